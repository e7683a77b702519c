//! Error types for btree-inspect.

use thiserror::Error;

use super::PageId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised while reading and decoding an index file.
///
/// Every error aborts the operation that raised it. The walker never
/// retries or substitutes defaults.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying file (seek failure, short read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested page lies outside the file.
    #[error("page {page_id} is out of range (file holds {page_count} pages)")]
    OutOfRange { page_id: PageId, page_count: u32 },

    /// The page id stored inside a page disagrees with its physical position.
    #[error("corrupt page: expected page id {expected}, found {found}")]
    CorruptPage { expected: PageId, found: PageId },

    /// A page was reached twice while walking the tree.
    ///
    /// A revisit means two pointers name the same page, which no valid tree
    /// contains. It is reported apart from [`Error::CorruptPage`] because the
    /// page itself decodes fine; the damage is in whichever page points at it.
    /// [`Error::is_corruption`] still counts it as corruption.
    #[error("cyclic reference: page {page_id} is reachable more than once")]
    CyclicReference { page_id: PageId },

    /// A header field holds a value no valid page can carry.
    #[error("malformed page {page_id}: {reason}")]
    MalformedPage { page_id: PageId, reason: String },

    /// A region declared by the page header extends past the page bytes.
    #[error("truncated page {page_id}: needs {needed} bytes, only {available} available")]
    TruncatedPage {
        page_id: PageId,
        needed: usize,
        available: usize,
    },

    /// An entry record declares more bytes than remain in the leaf payload.
    #[error("truncated entry #{index}: expected {expected_len} bytes, found {actual_len}")]
    TruncatedEntry {
        index: usize,
        expected_len: usize,
        actual_len: usize,
    },

    /// The layout descriptor cannot describe a readable page.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl Error {
    /// Whether this error describes damaged file contents rather than an
    /// environment or configuration failure.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptPage { .. }
                | Error::CyclicReference { .. }
                | Error::MalformedPage { .. }
                | Error::TruncatedPage { .. }
                | Error::TruncatedEntry { .. }
        )
    }

    pub(crate) fn malformed(page_id: PageId, reason: impl Into<String>) -> Self {
        Error::MalformedPage {
            page_id,
            reason: reason.into(),
        }
    }
}
