//! Page size and on-disk layout configuration.
//!
//! The index file carries no page-size or version field, so the reader has
//! to be told how pages are laid out. [`Layout`] bundles every offset the
//! decoder uses into one immutable value that is handed to the codec
//! explicitly, which lets the decoder be retargeted at format variants
//! without touching decoding code.

use super::error::{Error, Result};
use super::PageId;

/// Default size of a page in bytes (4KB), matching the engine's writer.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// The meta page always lives at physical page 0.
pub const META_PAGE_ID: PageId = PageId(0);

/// Byte width of a stored key.
pub const KEY_SIZE: usize = 8;

/// Byte width of a stored page id (child pointers, sibling links).
pub const PAGE_ID_SIZE: usize = 4;

/// Offsets of every field the decoder reads.
///
/// # Node page layout (default)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     page_id (i32)
/// 4       1     flag (0 = leaf, otherwise index)
/// 5       4     entry_count (i32)
/// 9       4     degree (i32)
/// 13      4     available bytes (i32)
/// 17      4     parent page id (i32)
/// 21      ...   index: keys[2*degree-1] (i64), then children (i32)
/// 21      4     leaf: previous leaf page id (i32)
/// 25      4     leaf: next leaf page id (i32)
/// 29      ...   leaf: entry records
/// ```
///
/// # Meta page layout (default)
/// ```text
/// 0       4     page_id (always 0)
/// 4       4     root_page_id (i32)
/// 8       4     level count (i32)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub page_size: usize,

    pub meta_page_id_offset: usize,
    pub meta_root_offset: usize,
    pub meta_levels_offset: usize,

    pub page_id_offset: usize,
    pub flag_offset: usize,
    pub entry_count_offset: usize,
    pub degree_offset: usize,
    pub available_offset: usize,
    pub parent_offset: usize,

    /// Start of the fixed-capacity key slots of an index page.
    pub keys_offset: usize,

    pub leaf_prev_offset: usize,
    pub leaf_next_offset: usize,
    /// Start of the entry records of a leaf page.
    pub entry_offset: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            meta_page_id_offset: 0,
            meta_root_offset: 4,
            meta_levels_offset: 8,
            page_id_offset: 0,
            flag_offset: 4,
            entry_count_offset: 5,
            degree_offset: 9,
            available_offset: 13,
            parent_offset: 17,
            keys_offset: 21,
            leaf_prev_offset: 21,
            leaf_next_offset: 25,
            entry_offset: 29,
        }
    }
}

impl Layout {
    /// Default offsets with a different page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Smallest page that still holds every fixed header field.
    pub fn min_page_size(&self) -> usize {
        let i32_fields = [
            self.meta_page_id_offset,
            self.meta_root_offset,
            self.meta_levels_offset,
            self.page_id_offset,
            self.entry_count_offset,
            self.degree_offset,
            self.available_offset,
            self.parent_offset,
            self.leaf_prev_offset,
            self.leaf_next_offset,
        ];
        i32_fields
            .iter()
            .map(|off| off + 4)
            .chain([self.flag_offset + 1, self.keys_offset, self.entry_offset])
            .max()
            .unwrap_or(0)
    }

    /// Check that a page of `page_size` bytes can hold the headers.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidLayout("page size must be non-zero".into()));
        }
        let min = self.min_page_size();
        if self.page_size < min {
            return Err(Error::InvalidLayout(format!(
                "page size {} is smaller than the {}-byte page header",
                self.page_size, min
            )));
        }
        Ok(())
    }

    /// Number of key slots reserved on an index page of the given degree.
    ///
    /// Returns `None` for a degree that cannot describe a node.
    pub fn key_capacity(degree: i32) -> Option<usize> {
        if degree < 1 {
            return None;
        }
        usize::try_from(degree).ok()?.checked_mul(2)?.checked_sub(1)
    }

    /// Start of the children array of an index page.
    ///
    /// The key region always reserves `2*degree - 1` slots regardless of
    /// how many keys are in use.
    pub fn children_offset(&self, degree: i32) -> Option<usize> {
        Self::key_capacity(degree)?
            .checked_mul(KEY_SIZE)?
            .checked_add(self.keys_offset)
    }
}
