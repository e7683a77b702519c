//! Node header and kind definitions.
//!
//! Every non-meta page starts with a [`NodeHeader`]:
//! - the page's own id, checked against its physical position
//! - a [`NodeKind`] discriminator
//! - entry count, degree, free space and parent link

use crate::common::config::PAGE_ID_SIZE;
use crate::common::{Error, Layout, PageId, Result};

/// Kind of a tree node page.
///
/// On disk this is a single flag byte: `0` marks a leaf and every other
/// value an index node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Holds key/value entries, no children.
    Leaf,
    /// Holds keys and child page ids.
    Index,
}

impl NodeKind {
    /// Convert from the on-disk flag byte.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => NodeKind::Leaf,
            _ => NodeKind::Index,
        }
    }

    /// Flag byte written for this kind.
    pub fn as_u8(self) -> u8 {
        match self {
            NodeKind::Leaf => 0,
            NodeKind::Index => 1,
        }
    }
}

/// Fields shared by leaf and index pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    pub page_id: PageId,
    pub kind: NodeKind,
    /// Number of keys on the page, never negative once decoded.
    pub entry_count: usize,
    pub degree: i32,
    pub available_bytes: i32,
    pub parent: PageId,
}

impl NodeHeader {
    /// Read the header of physical page `page_id`.
    ///
    /// The stored page id is checked first; a mismatch is reported as
    /// [`Error::CorruptPage`] before any other field is interpreted.
    pub fn from_bytes(page_id: PageId, data: &[u8], layout: &Layout) -> Result<Self> {
        let stored = PageId(read_i32(page_id, data, layout.page_id_offset)?);
        if stored != page_id {
            return Err(Error::CorruptPage {
                expected: page_id,
                found: stored,
            });
        }

        let kind = NodeKind::from_u8(read_u8(page_id, data, layout.flag_offset)?);

        let raw_count = read_i32(page_id, data, layout.entry_count_offset)?;
        let entry_count = usize::try_from(raw_count)
            .map_err(|_| Error::malformed(page_id, format!("negative entry count {}", raw_count)))?;

        Ok(Self {
            page_id,
            kind,
            entry_count,
            degree: read_i32(page_id, data, layout.degree_offset)?,
            available_bytes: read_i32(page_id, data, layout.available_offset)?,
            parent: PageId(read_i32(page_id, data, layout.parent_offset)?),
        })
    }

    /// Write this header into a page image.
    ///
    /// # Panics
    /// Panics if `data` is shorter than the header.
    pub fn write_to(&self, data: &mut [u8], layout: &Layout) {
        put_i32(data, layout.page_id_offset, self.page_id.0);
        data[layout.flag_offset] = self.kind.as_u8();
        put_i32(data, layout.entry_count_offset, self.entry_count as i32);
        put_i32(data, layout.degree_offset, self.degree);
        put_i32(data, layout.available_offset, self.available_bytes);
        put_i32(data, layout.parent_offset, self.parent.0);
    }
}

/// Return `data[offset..offset + len]` or a [`Error::TruncatedPage`].
pub(crate) fn region(page_id: PageId, data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.checked_add(len).ok_or_else(|| Error::TruncatedPage {
        page_id,
        needed: usize::MAX,
        available: data.len(),
    })?;
    data.get(offset..end).ok_or(Error::TruncatedPage {
        page_id,
        needed: end,
        available: data.len(),
    })
}

pub(crate) fn read_u8(page_id: PageId, data: &[u8], offset: usize) -> Result<u8> {
    Ok(region(page_id, data, offset, 1)?[0])
}

pub(crate) fn read_i32(page_id: PageId, data: &[u8], offset: usize) -> Result<i32> {
    let bytes = region(page_id, data, offset, PAGE_ID_SIZE)?;
    Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub(crate) fn put_i32(data: &mut [u8], offset: usize, value: i32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

// ============================================================================
// TESTS
// ============================================================================
