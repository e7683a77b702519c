//! Typed views of decoded pages.

use crate::common::PageId;

use super::entry::Entry;
use super::page_header::NodeKind;

/// Physical page 0: where the tree starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaPage {
    pub page_id: PageId,
    pub root_page_id: PageId,
    /// Tree height as recorded by the engine. Informational only.
    pub level_count: i32,
}

/// A page holding key/value entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPage {
    pub page_id: PageId,
    pub entry_count: usize,
    pub degree: i32,
    /// Free space left on the page, as recorded by the engine.
    pub available_bytes: i32,
    pub parent: PageId,
    pub prev_leaf: PageId,
    pub next_leaf: PageId,
    /// Decoded records; `None` unless entry decoding was requested.
    pub entries: Option<Vec<Entry>>,
}

/// An internal page holding keys and child pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    pub page_id: PageId,
    pub entry_count: usize,
    pub degree: i32,
    pub parent: PageId,
    pub keys: Vec<i64>,
    /// Always `keys.len() + 1` long.
    pub children: Vec<PageId>,
}

/// A decoded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Meta(MetaPage),
    Leaf(LeafPage),
    Index(IndexPage),
}

impl Page {
    pub fn page_id(&self) -> PageId {
        match self {
            Page::Meta(meta) => meta.page_id,
            Page::Leaf(leaf) => leaf.page_id,
            Page::Index(index) => index.page_id,
        }
    }

    /// Node kind, or `None` for the meta page.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Page::Meta(_) => None,
            Page::Leaf(_) => Some(NodeKind::Leaf),
            Page::Index(_) => Some(NodeKind::Index),
        }
    }

    /// Number of keys on a node page; zero for the meta page.
    pub fn entry_count(&self) -> usize {
        match self {
            Page::Meta(_) => 0,
            Page::Leaf(leaf) => leaf.entry_count,
            Page::Index(index) => index.entry_count,
        }
    }

    pub fn as_meta(&self) -> Option<&MetaPage> {
        match self {
            Page::Meta(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafPage> {
        match self {
            Page::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexPage> {
        match self {
            Page::Index(index) => Some(index),
            _ => None,
        }
    }
}
