//! Page identifier type.

use std::fmt;

/// Identifies a page in an index file.
///
/// The engine stores page ids as signed 32-bit integers, so a damaged file
/// can hand us negative ids. Those are kept as-is and rejected by the page
/// store rather than wrapped into huge unsigned offsets.
///
/// # Example
/// ```
/// use btree_inspect::PageId;
///
/// let page_id = PageId::new(42);
/// assert!(page_id.is_valid());
/// assert_eq!(page_id.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub i32);

impl PageId {
    /// Invalid/sentinel page ID, as written by the engine for "no page".
    pub const INVALID: PageId = PageId(-1);

    /// Create a new PageId.
    #[inline]
    pub fn new(id: i32) -> Self {
        PageId(id)
    }

    /// Check if this page ID can address a page (non-negative).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// Byte offset of this page for the given page size.
    ///
    /// Returns `None` for negative ids and for offsets past `u64::MAX`.
    #[inline]
    pub fn byte_offset(&self, page_size: usize) -> Option<u64> {
        if !self.is_valid() {
            return None;
        }
        (self.0 as u64).checked_mul(u64::try_from(page_size).ok()?)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "Page(INVALID)")
        } else {
            write!(f, "Page({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_new() {
        let pid = PageId::new(42);
        assert_eq!(pid.0, 42);
        assert!(pid.is_valid());
    }

    #[test]
    fn test_page_id_invalid() {
        assert!(!PageId::INVALID.is_valid());
        assert!(!PageId::new(-7).is_valid());
        assert_eq!(PageId::INVALID.0, -1);
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(PageId::new(0).byte_offset(4096), Some(0));
        assert_eq!(PageId::new(3).byte_offset(128), Some(384));
        assert_eq!(PageId::new(i32::MAX).byte_offset(4096), Some(i32::MAX as u64 * 4096));
        assert_eq!(PageId::INVALID.byte_offset(4096), None);
    }

    #[test]
    fn test_byte_offset_overflow() {
        assert_eq!(PageId::new(i32::MAX).byte_offset(usize::MAX), None);
        assert_eq!(PageId::new(0).byte_offset(usize::MAX), Some(0));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
        assert_eq!(format!("{}", PageId::INVALID), "Page(INVALID)");
        assert_eq!(format!("{}", PageId::new(-9)), "Page(-9)");
    }
}
