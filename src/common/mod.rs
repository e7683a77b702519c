//! Common types and utilities shared across btree-inspect.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Layout configuration
//! - Error types
//! - Page identifiers

pub mod config;
pub mod error;
mod page_id;

pub use config::Layout;
pub use error::{Error, Result};
pub use page_id::PageId;
