//! B-tree traversal over a decoded index file.
//!
//! - [`TreeWalker`] - Depth-first walk from the meta page's root, plus a
//!   physical scan of every page
//! - [`IndexFile`] - Opens a file, validates its meta page and runs walks

mod file;
mod walker;

pub use file::IndexFile;
pub use walker::{TreeWalker, Visit, WalkSummary};
