//! btree-inspect - decode and walk fixed-size-page B-tree index files.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         btree-inspect                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Reporting (report/, bin)                    │   │
//! │  │          Reporter → one line per visited page            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Traversal (index/btree/)                    │   │
//! │  │   IndexFile + TreeWalker (pre-order walk, cycle guard)   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Decoding (storage/page/)                    │   │
//! │  │   PageCodec → Meta | Leaf | Index,  entry records        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Storage (storage/)                          │   │
//! │  │      PageStore: page_id × page_size → page bytes         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Layout, Error)
//! - [`storage`] - Page reads and page formats
//! - [`index`] - Tree traversal
//! - [`report`] - Text rendering
//! - [`cli`] - Command-line arguments and the report run
//!
//! # Quick Start
//! ```no_run
//! use btree_inspect::index::btree::{IndexFile, Visit};
//! use btree_inspect::Layout;
//!
//! let mut file = IndexFile::open("btree.idx", Layout::default()).unwrap();
//! let summary = file.walk(false, |_, _| Visit::Continue).unwrap();
//! println!("{} pages reachable", summary.pages_visited);
//! ```

pub mod cli;
pub mod common;
pub mod index;
pub mod report;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_PAGE_SIZE;
pub use common::{Error, Layout, PageId, Result};

pub use index::btree::{IndexFile, TreeWalker, Visit, WalkSummary};
pub use storage::page::{Entry, IndexPage, LeafPage, MetaPage, NodeKind, Page, PageCodec};
pub use storage::PageStore;
