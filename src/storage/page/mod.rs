//! Page types, layout and codecs.
//!
//! This module contains:
//! - [`PageBuf`] - The raw bytes of one physical page
//! - [`NodeHeader`] / [`NodeKind`] - Fields shared by tree node pages
//! - [`PageCodec`] - Raw bytes to typed [`Page`]s
//! - [`entry`] - Leaf entry records
//! - [`encode`] - In-memory page images

mod codec;
pub mod encode;
pub mod entry;
#[allow(clippy::module_inception)]
mod page;
mod page_header;
mod types;

pub use codec::{DecodeOptions, PageCodec};
pub use entry::{decode_entries, Entry};
pub use page::PageBuf;
pub use page_header::{NodeHeader, NodeKind};
pub use types::{IndexPage, LeafPage, MetaPage, Page};
