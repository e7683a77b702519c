//! Page Store - random-access page reads from an index file.
//!
//! The [`PageStore`] handles all direct file access:
//! - Opening the index file read-only
//! - Bounds-checking page ids against the file extent
//! - Reading exactly one page per request

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, warn};

use crate::common::{Error, PageId, Result};
use crate::storage::page::PageBuf;

/// Reads fixed-size pages from a page-addressed source.
///
/// # File Layout
/// Pages are laid out back to back:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
/// │ (meta)  │         │         │         │         │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      P        2P      ...     N×P
/// ```
///
/// Page N is located at offset `N × page_size`. A trailing partial page is
/// not addressable.
///
/// # Thread Safety
/// `PageStore` is **single-threaded**; reads take `&mut self`, which
/// serializes them.
///
/// # Preconditions
/// The engine that produced the file must not be writing to it while it is
/// being read. This is not checked.
pub struct PageStore<R = File> {
    reader: R,
    page_size: usize,
    /// Number of whole pages in the source.
    page_count: u32,
}

impl PageStore<File> {
    /// Open an existing index file for reading.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Self> {
        let file = OpenOptions::new().read(true).open(&path)?;
        let file_size = file.metadata()?.len();
        debug!(
            "opened {} ({} bytes, page size {})",
            path.as_ref().display(),
            file_size,
            page_size
        );
        Self::with_len(file, file_size, page_size)
    }
}

impl<R: Read + Seek> PageStore<R> {
    /// Wrap any seekable source, measuring its length.
    pub fn from_reader(mut reader: R, page_size: usize) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        Self::with_len(reader, len, page_size)
    }

    fn with_len(reader: R, len: u64, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidLayout("page size must be non-zero".into()));
        }
        let pages = len / page_size as u64;
        let remainder = len % page_size as u64;
        if remainder != 0 {
            warn!(
                "source length {} is not a multiple of page size {}; ignoring {} trailing bytes",
                len, page_size, remainder
            );
        }
        let page_count = u32::try_from(pages).unwrap_or(u32::MAX);

        Ok(Self {
            reader,
            page_size,
            page_count,
        })
    }

    /// Read a page.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the page lies outside the file, and
    /// `Error::Io` if the seek or read fails.
    pub fn read_page(&mut self, page_id: PageId) -> Result<PageBuf> {
        let out_of_range = Error::OutOfRange {
            page_id,
            page_count: self.page_count,
        };
        if !page_id.is_valid() || page_id.0 as u32 >= self.page_count {
            return Err(out_of_range);
        }
        let offset = page_id.byte_offset(self.page_size).ok_or(out_of_range)?;

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; self.page_size];
        self.reader.read_exact(&mut data)?;

        debug!("read {} at offset {}", page_id, offset);
        Ok(PageBuf::new(page_id, data))
    }

    /// Get the number of whole pages in the source.
    #[inline]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
