//! Index structures read from disk.

pub mod btree;
