//! In-memory page images.
//!
//! Builds page byte images in the layout the decoder expects. Used to
//! produce synthetic index files for tests and benchmarks; nothing here
//! touches an existing file.

use crate::common::config::{KEY_SIZE, PAGE_ID_SIZE};
use crate::common::{Error, Layout, PageId, Result};

use super::entry::{encode_entries, Entry};
use super::page_header::{put_i32, NodeHeader, NodeKind};
use super::types::{IndexPage, LeafPage};

/// Image of the meta page.
///
/// # Panics
/// Panics if the layout's page size cannot hold the meta fields.
pub fn meta_page(layout: &Layout, root_page_id: PageId, level_count: i32) -> Vec<u8> {
    let mut data = vec![0u8; layout.page_size];
    put_i32(&mut data, layout.meta_page_id_offset, 0);
    put_i32(&mut data, layout.meta_root_offset, root_page_id.0);
    put_i32(&mut data, layout.meta_levels_offset, level_count);
    data
}

/// Image of a leaf page. `leaf.entries` must be populated.
pub fn encode_leaf(layout: &Layout, leaf: &LeafPage) -> Result<Vec<u8>> {
    layout.validate()?;
    let entries = leaf.entries.as_deref().unwrap_or_default();
    let payload = encode_entries(entries);
    let end = layout.entry_offset + payload.len();
    if end > layout.page_size {
        return Err(Error::malformed(
            leaf.page_id,
            format!("{} entry bytes do not fit a {}-byte page", payload.len(), layout.page_size),
        ));
    }

    let mut data = vec![0u8; layout.page_size];
    NodeHeader {
        page_id: leaf.page_id,
        kind: NodeKind::Leaf,
        entry_count: entries.len(),
        degree: leaf.degree,
        available_bytes: leaf.available_bytes,
        parent: leaf.parent,
    }
    .write_to(&mut data, layout);
    put_i32(&mut data, layout.leaf_prev_offset, leaf.prev_leaf.0);
    put_i32(&mut data, layout.leaf_next_offset, leaf.next_leaf.0);
    data[layout.entry_offset..end].copy_from_slice(&payload);
    Ok(data)
}

/// Image of a standalone leaf page with no parent or siblings.
pub fn leaf_page(layout: &Layout, page_id: PageId, entries: &[Entry]) -> Result<Vec<u8>> {
    let used: usize = entries.iter().map(Entry::encoded_len).sum();
    let available = layout.page_size.saturating_sub(layout.entry_offset + used);
    encode_leaf(
        layout,
        &LeafPage {
            page_id,
            entry_count: entries.len(),
            degree: 2,
            available_bytes: i32::try_from(available).unwrap_or(i32::MAX),
            parent: PageId::INVALID,
            prev_leaf: PageId::INVALID,
            next_leaf: PageId::INVALID,
            entries: Some(entries.to_vec()),
        },
    )
}

/// Image of an index page using the fixed-capacity slot layout.
pub fn encode_index(layout: &Layout, index: &IndexPage) -> Result<Vec<u8>> {
    layout.validate()?;
    let page_id = index.page_id;
    if index.children.len() != index.keys.len() + 1 {
        return Err(Error::malformed(
            page_id,
            format!("{} keys need {} children, got {}", index.keys.len(), index.keys.len() + 1, index.children.len()),
        ));
    }
    let capacity = Layout::key_capacity(index.degree)
        .ok_or_else(|| Error::malformed(page_id, format!("invalid degree {}", index.degree)))?;
    if index.keys.len() > capacity {
        return Err(Error::malformed(page_id, "too many keys for degree"));
    }
    let children_offset = layout
        .children_offset(index.degree)
        .ok_or_else(|| Error::malformed(page_id, format!("invalid degree {}", index.degree)))?;
    let end = children_offset + index.children.len() * PAGE_ID_SIZE;
    if end > layout.page_size {
        return Err(Error::malformed(
            page_id,
            format!("degree {} needs {} bytes, page has {}", index.degree, end, layout.page_size),
        ));
    }

    let mut data = vec![0u8; layout.page_size];
    NodeHeader {
        page_id,
        kind: NodeKind::Index,
        entry_count: index.keys.len(),
        degree: index.degree,
        available_bytes: 0,
        parent: index.parent,
    }
    .write_to(&mut data, layout);
    for (i, key) in index.keys.iter().enumerate() {
        let off = layout.keys_offset + i * KEY_SIZE;
        data[off..off + KEY_SIZE].copy_from_slice(&key.to_le_bytes());
    }
    for (i, child) in index.children.iter().enumerate() {
        put_i32(&mut data, children_offset + i * PAGE_ID_SIZE, child.0);
    }
    Ok(data)
}

/// Image of an index page with no parent link.
pub fn index_page(
    layout: &Layout,
    page_id: PageId,
    degree: i32,
    keys: &[i64],
    children: &[PageId],
) -> Result<Vec<u8>> {
    encode_index(
        layout,
        &IndexPage {
            page_id,
            entry_count: keys.len(),
            degree,
            parent: PageId::INVALID,
            keys: keys.to_vec(),
            children: children.to_vec(),
        },
    )
}
