//! Depth-first traversal of a B-tree index file.

use std::collections::HashSet;
use std::io::{Read, Seek};

use log::{debug, info, warn};

use crate::common::config::META_PAGE_ID;
use crate::common::{Error, PageId, Result};
use crate::storage::page::{DecodeOptions, MetaPage, Page, PageCodec};
use crate::storage::PageStore;

/// What a visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// End the walk now; nothing further is read.
    Stop,
}

/// Counters gathered during a walk or scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub pages_visited: usize,
    pub leaf_pages: usize,
    pub index_pages: usize,
    /// Sum of `entry_count` over visited leaves.
    pub leaf_entries: usize,
    /// Deepest level reached, root = 0.
    pub max_depth: usize,
    /// Whether a visitor ended the walk early.
    pub stopped: bool,
}

impl WalkSummary {
    pub(crate) fn record(&mut self, page: &Page, depth: usize) {
        self.pages_visited += 1;
        self.max_depth = self.max_depth.max(depth);
        match page {
            Page::Leaf(leaf) => {
                self.leaf_pages += 1;
                self.leaf_entries += leaf.entry_count;
            }
            Page::Index(_) => self.index_pages += 1,
            Page::Meta(_) => {}
        }
    }
}

/// Walks the tree rooted at the meta page's root pointer.
///
/// Pages are visited depth-first in pre-order, children strictly left to
/// right. The walk uses an explicit stack and remembers every page id it has
/// reached, so a cyclic or shared child pointer fails with
/// [`Error::CyclicReference`] instead of looping.
///
/// Any error aborts the entire walk: pointers read from a damaged page
/// cannot be trusted, so siblings are not attempted.
///
/// # Example
/// ```no_run
/// use btree_inspect::index::btree::{TreeWalker, Visit};
/// use btree_inspect::storage::page::PageCodec;
/// use btree_inspect::storage::PageStore;
/// use btree_inspect::{Layout, PageId};
///
/// let layout = Layout::default();
/// let codec = PageCodec::new(layout);
/// let mut store = PageStore::open("btree.idx", layout.page_size).unwrap();
///
/// let meta = codec.decode_meta(store.read_page(PageId::new(0)).unwrap().as_slice()).unwrap();
/// let summary = TreeWalker::new(&mut store, &codec)
///     .walk(&meta, |page, depth| {
///         println!("{:indent$}{:?}", "", page.page_id(), indent = depth * 2);
///         Visit::Continue
///     })
///     .unwrap();
/// println!("visited {} pages", summary.pages_visited);
/// ```
pub struct TreeWalker<'a, R> {
    store: &'a mut PageStore<R>,
    codec: &'a PageCodec,
    options: DecodeOptions,
}

impl<'a, R: Read + Seek> TreeWalker<'a, R> {
    pub fn new(store: &'a mut PageStore<R>, codec: &'a PageCodec) -> Self {
        Self {
            store,
            codec,
            options: DecodeOptions::headers_only(),
        }
    }

    /// Decode leaf entries while walking.
    pub fn with_entries(mut self, entries: bool) -> Self {
        self.options.entries = entries;
        self
    }

    /// Visit every page reachable from `meta.root_page_id`.
    ///
    /// `visit` receives each decoded page and its depth (root = 0).
    pub fn walk<F>(&mut self, meta: &MetaPage, mut visit: F) -> Result<WalkSummary>
    where
        F: FnMut(&Page, usize) -> Visit,
    {
        info!(
            "walking tree from root {} ({} levels recorded)",
            meta.root_page_id, meta.level_count
        );
        let mut summary = WalkSummary::default();
        let mut seen = HashSet::new();
        // (page, depth, index page that points at it)
        let mut stack: Vec<(PageId, usize, Option<PageId>)> = vec![(meta.root_page_id, 0, None)];

        while let Some((page_id, depth, parent)) = stack.pop() {
            if page_id == META_PAGE_ID {
                // The page holding the bad pointer is the one at fault.
                return Err(match parent {
                    Some(parent) => Error::malformed(parent, "child pointer refers to the meta page"),
                    None => Error::malformed(META_PAGE_ID, "root pointer refers to the meta page"),
                });
            }
            if !seen.insert(page_id) {
                return Err(Error::CyclicReference { page_id });
            }

            let buf = self.store.read_page(page_id)?;
            let page = self.codec.decode_with(page_id, buf.as_slice(), self.options)?;
            summary.record(&page, depth);

            if visit(&page, depth) == Visit::Stop {
                debug!("visitor stopped the walk at {}", page_id);
                summary.stopped = true;
                return Ok(summary);
            }

            if let Page::Index(index) = &page {
                // Reverse push so the leftmost child is popped first.
                stack.extend(
                    index
                        .children
                        .iter()
                        .rev()
                        .map(|&child| (child, depth + 1, Some(page_id))),
                );
            }
        }

        check_levels(meta, &summary);
        info!(
            "walk finished: {} pages ({} index, {} leaf), {} entries",
            summary.pages_visited, summary.index_pages, summary.leaf_pages, summary.leaf_entries
        );
        Ok(summary)
    }

    /// Decode every physical page after the meta page, in file order.
    ///
    /// Unlike [`walk`](Self::walk) this does not follow child pointers, so
    /// it also reaches pages the tree no longer links to. Depth is always 0.
    pub fn scan<F>(&mut self, mut visit: F) -> Result<WalkSummary>
    where
        F: FnMut(&Page, usize) -> Visit,
    {
        let page_count = self.store.page_count();
        info!("scanning {} physical pages", page_count.saturating_sub(1));
        let mut summary = WalkSummary::default();

        let last = i32::try_from(page_count).unwrap_or(i32::MAX);
        for page_id in (1..last).map(PageId) {
            let buf = self.store.read_page(page_id)?;
            let page = self.codec.decode_with(page_id, buf.as_slice(), self.options)?;
            summary.record(&page, 0);

            if visit(&page, 0) == Visit::Stop {
                summary.stopped = true;
                break;
            }
        }
        Ok(summary)
    }
}

fn check_levels(meta: &MetaPage, summary: &WalkSummary) {
    if summary.pages_visited == 0 {
        return;
    }
    let observed = summary.max_depth + 1;
    if i32::try_from(observed).ok() != Some(meta.level_count) {
        warn!(
            "meta page records {} levels but the tree is {} levels deep",
            meta.level_count, observed
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
