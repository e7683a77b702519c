//! PageBuf - the raw bytes of one physical page.
//!
//! A [`PageBuf`] is what the [`PageStore`](crate::storage::PageStore) hands
//! out: exactly `page_size` bytes plus the physical page id they were read
//! from. Decoding into typed pages happens in
//! [`PageCodec`](super::PageCodec).

use crate::common::PageId;

/// The raw bytes of a page, tagged with the physical page they came from.
///
/// The page size is a runtime setting, so the buffer is heap-allocated
/// rather than a fixed-size array.
///
/// # Example
/// ```
/// use btree_inspect::storage::page::PageBuf;
/// use btree_inspect::PageId;
///
/// let page = PageBuf::new(PageId::new(3), vec![0u8; 128]);
/// assert_eq!(page.len(), 128);
/// assert_eq!(page.page_id(), PageId::new(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuf {
    page_id: PageId,
    data: Box<[u8]>,
}

impl PageBuf {
    /// Wrap bytes read from physical page `page_id`.
    pub fn new(page_id: PageId, data: impl Into<Box<[u8]>>) -> Self {
        Self {
            page_id,
            data: data.into(),
        }
    }

    /// Physical page this buffer was read from.
    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Get immutable slice of page data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Size of the page in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for PageBuf {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_buf_new() {
        let page = PageBuf::new(PageId::new(1), vec![0u8; 4096]);
        assert_eq!(page.len(), 4096);
        assert!(!page.is_empty());
        assert_eq!(page.as_slice()[0], 0);
        assert_eq!(page.as_slice()[4095], 0);
    }

    #[test]
    fn test_page_buf_keeps_bytes() {
        let mut data = vec![0u8; 64];
        data[0] = 0xAB;
        data[63] = 0xCD;

        let page = PageBuf::new(PageId::new(5), data);
        assert_eq!(page.as_ref()[0], 0xAB);
        assert_eq!(page.as_slice()[63], 0xCD);
        assert_eq!(page.page_id(), PageId::new(5));
    }
}
