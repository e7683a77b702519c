//! Page codec - raw page bytes to typed pages.
//!
//! [`PageCodec`] classifies a page and decodes the fields of its kind. The
//! one check it always performs is page identity: the id stored in the page
//! must equal the physical page it was read from.

use log::debug;

use crate::common::config::{KEY_SIZE, META_PAGE_ID, PAGE_ID_SIZE};
use crate::common::{Error, Layout, PageId, Result};

use super::entry::decode_entries;
use super::page_header::{read_i32, region, NodeHeader, NodeKind};
use super::types::{IndexPage, LeafPage, MetaPage, Page};

/// What to decode beyond page headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode the entry records of leaf pages.
    pub entries: bool,
}

impl DecodeOptions {
    /// Headers, keys and children only.
    pub fn headers_only() -> Self {
        Self::default()
    }

    /// Also decode leaf entries.
    pub fn with_entries() -> Self {
        Self { entries: true }
    }
}

/// Decodes pages laid out according to a [`Layout`].
///
/// # Example
/// ```
/// use btree_inspect::storage::page::{encode, Entry, Page, PageCodec};
/// use btree_inspect::{Layout, PageId};
///
/// let layout = Layout::with_page_size(256);
/// let codec = PageCodec::new(layout);
///
/// let bytes = encode::leaf_page(&layout, PageId::new(1), &[Entry::new(7, "seven")]).unwrap();
/// let page = codec.decode(PageId::new(1), &bytes).unwrap();
/// assert!(matches!(page, Page::Leaf(ref leaf) if leaf.entry_count == 1));
/// ```
#[derive(Debug, Clone)]
pub struct PageCodec {
    layout: Layout,
}

impl PageCodec {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Decode page headers, keys and children; leaf entries are skipped.
    pub fn decode(&self, page_id: PageId, bytes: &[u8]) -> Result<Page> {
        self.decode_with(page_id, bytes, DecodeOptions::headers_only())
    }

    /// Decode physical page `page_id` from `bytes`.
    ///
    /// Page 0 is always decoded as the meta page.
    pub fn decode_with(&self, page_id: PageId, bytes: &[u8], options: DecodeOptions) -> Result<Page> {
        if page_id == META_PAGE_ID {
            return self.decode_meta(bytes).map(Page::Meta);
        }

        let header = NodeHeader::from_bytes(page_id, bytes, &self.layout)?;
        debug!(
            "decoded header of {}: {:?} with {} entries",
            page_id, header.kind, header.entry_count
        );
        match header.kind {
            NodeKind::Leaf => self.decode_leaf(&header, bytes, options).map(Page::Leaf),
            NodeKind::Index => self.decode_index(&header, bytes).map(Page::Index),
        }
    }

    /// Decode the meta page (physical page 0).
    pub fn decode_meta(&self, bytes: &[u8]) -> Result<MetaPage> {
        let layout = &self.layout;
        let stored = PageId(read_i32(META_PAGE_ID, bytes, layout.meta_page_id_offset)?);
        if stored != META_PAGE_ID {
            return Err(Error::CorruptPage {
                expected: META_PAGE_ID,
                found: stored,
            });
        }
        Ok(MetaPage {
            page_id: stored,
            root_page_id: PageId(read_i32(META_PAGE_ID, bytes, layout.meta_root_offset)?),
            level_count: read_i32(META_PAGE_ID, bytes, layout.meta_levels_offset)?,
        })
    }

    fn decode_leaf(&self, header: &NodeHeader, bytes: &[u8], options: DecodeOptions) -> Result<LeafPage> {
        let layout = &self.layout;
        let page_id = header.page_id;
        let prev_leaf = PageId(read_i32(page_id, bytes, layout.leaf_prev_offset)?);
        let next_leaf = PageId(read_i32(page_id, bytes, layout.leaf_next_offset)?);

        let entries = if options.entries {
            let payload = bytes.get(layout.entry_offset..).ok_or(Error::TruncatedPage {
                page_id,
                needed: layout.entry_offset,
                available: bytes.len(),
            })?;
            Some(decode_entries(payload, header.entry_count)?)
        } else {
            None
        };

        Ok(LeafPage {
            page_id,
            entry_count: header.entry_count,
            degree: header.degree,
            available_bytes: header.available_bytes,
            parent: header.parent,
            prev_leaf,
            next_leaf,
            entries,
        })
    }

    fn decode_index(&self, header: &NodeHeader, bytes: &[u8]) -> Result<IndexPage> {
        let page_id = header.page_id;
        let count = header.entry_count;

        let capacity = Layout::key_capacity(header.degree)
            .ok_or_else(|| Error::malformed(page_id, format!("invalid degree {}", header.degree)))?;
        if count > capacity {
            return Err(Error::malformed(
                page_id,
                format!(
                    "{} keys exceed the {} slots of degree {}",
                    count, capacity, header.degree
                ),
            ));
        }

        // count <= capacity bounds both region sizes below.
        let key_bytes = region(page_id, bytes, self.layout.keys_offset, count * KEY_SIZE)?;
        let keys = key_bytes
            .chunks_exact(KEY_SIZE)
            .map(|chunk| {
                let mut raw = [0u8; KEY_SIZE];
                raw.copy_from_slice(chunk);
                i64::from_le_bytes(raw)
            })
            .collect::<Vec<_>>();

        let children_offset = self
            .layout
            .children_offset(header.degree)
            .ok_or_else(|| Error::malformed(page_id, format!("invalid degree {}", header.degree)))?;
        let child_bytes = region(page_id, bytes, children_offset, (count + 1) * PAGE_ID_SIZE)?;
        let children = child_bytes
            .chunks_exact(PAGE_ID_SIZE)
            .map(|chunk| PageId(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect::<Vec<_>>();

        Ok(IndexPage {
            page_id,
            entry_count: count,
            degree: header.degree,
            parent: header.parent,
            keys,
            children,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
