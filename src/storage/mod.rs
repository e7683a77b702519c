//! Storage layer - page reads and page formats.
//!
//! This module handles the on-disk side:
//! - [`PageStore`] - Random-access page reads
//! - [`page`] - Page types, layouts and codecs

pub mod page;
mod page_store;

pub use page_store::PageStore;
