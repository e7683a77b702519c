//! Index file facade: store + codec + meta page in one place.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::info;

use crate::common::config::META_PAGE_ID;
use crate::common::{Error, Layout, PageId, Result};
use crate::storage::page::{DecodeOptions, MetaPage, Page, PageCodec};
use crate::storage::PageStore;

use super::walker::{TreeWalker, Visit, WalkSummary};

/// An opened B-tree index file.
///
/// Reads and validates the meta page up front, then walks or scans on
/// demand. Every walk decodes pages afresh; nothing is cached between
/// walks.
///
/// # Example
/// ```no_run
/// use btree_inspect::index::btree::{IndexFile, Visit};
/// use btree_inspect::Layout;
///
/// let mut file = IndexFile::open("btree.idx", Layout::default()).unwrap();
/// println!("root is {}", file.meta().root_page_id);
/// file.walk(false, |page, _| {
///     println!("{} has {} entries", page.page_id(), page.entry_count());
///     Visit::Continue
/// })
/// .unwrap();
/// ```
pub struct IndexFile<R = File> {
    store: PageStore<R>,
    codec: PageCodec,
    meta: MetaPage,
}

impl IndexFile<File> {
    /// Open the index file at `path`.
    ///
    /// # Errors
    /// Fails if the layout is invalid, the file cannot be read, or the meta
    /// page is missing or corrupt.
    pub fn open<P: AsRef<Path>>(path: P, layout: Layout) -> Result<Self> {
        layout.validate()?;
        let store = PageStore::open(path, layout.page_size)?;
        Self::from_store(store, layout)
    }
}

impl<R: Read + Seek> IndexFile<R> {
    /// Use an already opened store. The store's page size must match the
    /// layout.
    pub fn from_store(mut store: PageStore<R>, layout: Layout) -> Result<Self> {
        layout.validate()?;
        if store.page_size() != layout.page_size {
            return Err(Error::InvalidLayout(format!(
                "store reads {}-byte pages, layout expects {}",
                store.page_size(),
                layout.page_size
            )));
        }
        let codec = PageCodec::new(layout);
        let buf = store.read_page(META_PAGE_ID)?;
        let meta = codec.decode_meta(buf.as_slice())?;
        info!(
            "meta page: root {}, {} levels, {} pages in file",
            meta.root_page_id,
            meta.level_count,
            store.page_count()
        );
        Ok(Self { store, codec, meta })
    }

    #[inline]
    pub fn meta(&self) -> &MetaPage {
        &self.meta
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        self.codec.layout()
    }

    #[inline]
    pub fn page_count(&self) -> u32 {
        self.store.page_count()
    }

    /// Read and decode a single page.
    pub fn page(&mut self, page_id: PageId, entries: bool) -> Result<Page> {
        let buf = self.store.read_page(page_id)?;
        let options = if entries {
            DecodeOptions::with_entries()
        } else {
            DecodeOptions::headers_only()
        };
        self.codec.decode_with(page_id, buf.as_slice(), options)
    }

    /// Walk the tree from the root. See [`TreeWalker::walk`].
    pub fn walk<F>(&mut self, entries: bool, visit: F) -> Result<WalkSummary>
    where
        F: FnMut(&Page, usize) -> Visit,
    {
        let meta = self.meta;
        TreeWalker::new(&mut self.store, &self.codec)
            .with_entries(entries)
            .walk(&meta, visit)
    }

    /// Decode every physical page in file order. See [`TreeWalker::scan`].
    pub fn scan<F>(&mut self, entries: bool, visit: F) -> Result<WalkSummary>
    where
        F: FnMut(&Page, usize) -> Visit,
    {
        TreeWalker::new(&mut self.store, &self.codec)
            .with_entries(entries)
            .scan(visit)
    }
}
