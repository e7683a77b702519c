//! Integration tests for walking index files on disk.
//!
//! Each test writes a synthetic index file into a temp dir, opens it through
//! `IndexFile` and checks what the walk reports.

use btree_inspect::storage::page::{encode, DecodeOptions, Entry, Page, PageCodec};
use btree_inspect::storage::PageStore;
use btree_inspect::{Error, IndexFile, Layout, PageId, Visit};
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const PAGE: usize = 128;

fn layout() -> Layout {
    Layout::with_page_size(PAGE)
}

fn write_file(pages: &[Vec<u8>]) -> (PathBuf, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("btree.idx");
    std::fs::write(&path, pages.concat()).unwrap();
    (path, dir)
}

fn collect(file: &mut IndexFile, entries: bool) -> Result<Vec<(usize, Page)>, Error> {
    let mut pages = Vec::new();
    file.walk(entries, |page, depth| {
        pages.push((depth, page.clone()));
        Visit::Continue
    })?;
    Ok(pages)
}

/// meta -> index(3) -> [leaf(1), leaf(2)]
fn small_tree() -> Vec<Vec<u8>> {
    let layout = layout();
    vec![
        encode::meta_page(&layout, PageId::new(3), 2),
        encode::leaf_page(&layout, PageId::new(1), &[Entry::new(1, "alpha"), Entry::new(2, "beta")]).unwrap(),
        encode::leaf_page(&layout, PageId::new(2), &[Entry::new(8, "gamma")]).unwrap(),
        encode::index_page(&layout, PageId::new(3), 2, &[8], &[PageId::new(1), PageId::new(2)]).unwrap(),
    ]
}

// ============================================================================
// Scenario A: meta + one empty leaf
// ============================================================================

#[test]
fn test_single_empty_leaf() {
    let layout = layout();
    let (path, _dir) = write_file(&[
        encode::meta_page(&layout, PageId::new(1), 1),
        encode::leaf_page(&layout, PageId::new(1), &[]).unwrap(),
    ]);

    let mut file = IndexFile::open(&path, layout).unwrap();
    assert_eq!(file.meta().page_id, PageId::new(0));

    let pages = collect(&mut file, true).unwrap();
    assert_eq!(pages.len(), 1);
    let leaf = pages[0].1.as_leaf().expect("root should be a leaf");
    assert_eq!(leaf.entry_count, 0);
    assert_eq!(leaf.entries.as_deref(), Some(&[][..]));
}

// ============================================================================
// Scenario B: root pointer past end of file
// ============================================================================

#[test]
fn test_root_past_eof_is_out_of_range() {
    let layout = layout();
    let (path, _dir) = write_file(&[
        encode::meta_page(&layout, PageId::new(9), 1),
        encode::leaf_page(&layout, PageId::new(1), &[]).unwrap(),
    ]);

    let mut file = IndexFile::open(&path, layout).unwrap();
    let mut visited = 0;
    let err = file
        .walk(false, |_, _| {
            visited += 1;
            Visit::Continue
        })
        .unwrap_err();

    assert!(matches!(err, Error::OutOfRange { page_id: PageId(9), page_count: 2 }));
    assert_eq!(visited, 0);
}

// ============================================================================
// Scenario C: corrupted page id on an index page
// ============================================================================

#[test]
fn test_corrupt_index_page_stops_walk() {
    let mut pages = small_tree();
    // flip a bit of the stored page id of the index page
    pages[3][0] ^= 0x40;
    let (path, _dir) = write_file(&pages);

    let mut file = IndexFile::open(&path, layout()).unwrap();
    let mut visited = 0;
    let err = file
        .walk(false, |_, _| {
            visited += 1;
            Visit::Continue
        })
        .unwrap_err();

    match err {
        Error::CorruptPage { expected, found } => {
            assert_eq!(expected, PageId::new(3));
            assert_eq!(found, PageId::new(3 ^ 0x40));
        }
        other => panic!("Expected CorruptPage, got {:?}", other),
    }
    assert_eq!(visited, 0);
}

#[test]
fn test_corrupt_leaf_aborts_remaining_siblings() {
    let mut pages = small_tree();
    pages[1][0] = 0x7F;
    let (path, _dir) = write_file(&pages);

    let mut file = IndexFile::open(&path, layout()).unwrap();
    let mut visited = Vec::new();
    let err = file
        .walk(false, |page, _| {
            visited.push(page.page_id().0);
            Visit::Continue
        })
        .unwrap_err();

    assert!(err.is_corruption());
    // only the index page was produced; leaf 2 is never attempted
    assert_eq!(visited, vec![3]);
}

// ============================================================================
// Scenario D: fixed-capacity children offset
// ============================================================================

#[test]
fn test_children_located_after_full_key_capacity() {
    let layout = Layout::default();
    let codec = PageCodec::new(layout);
    let keys_start = layout.keys_offset;

    let bytes = encode::index_page(
        &layout,
        PageId::new(1),
        4,
        &[100, 200],
        &[PageId::new(2), PageId::new(3), PageId::new(4)],
    )
    .unwrap();

    // The encoder and decoder agree with the fixed slot layout...
    let child_at = |off: usize| i32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
    assert_eq!(child_at(keys_start + 7 * 8), 2);
    assert_eq!(child_at(keys_start + 7 * 8 + 8), 4);
    // ...and nothing lives at the tightly packed position.
    assert_eq!(child_at(keys_start + 2 * 8), 0);

    let page = codec.decode(PageId::new(1), &bytes).unwrap();
    let index = page.as_index().unwrap();
    assert_eq!(index.keys, vec![100, 200]);
    assert_eq!(index.children, vec![PageId::new(2), PageId::new(3), PageId::new(4)]);
}

// ============================================================================
// General properties
// ============================================================================

#[test]
fn test_walk_small_tree() {
    let (path, _dir) = write_file(&small_tree());
    let mut file = IndexFile::open(&path, layout()).unwrap();

    let pages = collect(&mut file, true).unwrap();
    let ids: Vec<(usize, i32)> = pages.iter().map(|(d, p)| (*d, p.page_id().0)).collect();
    assert_eq!(ids, vec![(0, 3), (1, 1), (1, 2)]);

    let index = pages[0].1.as_index().unwrap();
    assert_eq!(index.children.len(), index.keys.len() + 1);

    let first = pages[1].1.as_leaf().unwrap();
    let entries = first.entries.as_ref().unwrap();
    assert_eq!(entries.len(), first.entry_count);
    assert_eq!(entries[1], Entry::new(2, "beta"));
}

#[test]
fn test_walk_is_repeatable() {
    let (path, _dir) = write_file(&small_tree());
    let mut file = IndexFile::open(&path, layout()).unwrap();

    let first = collect(&mut file, true).unwrap();
    let second = collect(&mut file, true).unwrap();
    assert_eq!(first, second);

    // a fresh handle sees the same thing
    let mut reopened = IndexFile::open(&path, layout()).unwrap();
    assert_eq!(collect(&mut reopened, true).unwrap(), first);
}

#[test]
fn test_every_page_decodes_to_its_own_id() {
    let (path, _dir) = write_file(&small_tree());
    let codec = PageCodec::new(layout());
    let mut store = PageStore::open(&path, PAGE).unwrap();

    for raw in 0..store.page_count() as i32 {
        let id = PageId::new(raw);
        let buf = store.read_page(id).unwrap();
        let page = codec.decode_with(id, buf.as_slice(), DecodeOptions::with_entries()).unwrap();
        assert_eq!(page.page_id(), id);
    }
}

#[test]
fn test_scan_reaches_unlinked_pages() {
    let layout = layout();
    let mut pages = small_tree();
    pages.push(encode::leaf_page(&layout, PageId::new(4), &[Entry::new(50, "stale")]).unwrap());
    let (path, _dir) = write_file(&pages);

    let mut file = IndexFile::open(&path, layout).unwrap();
    let walked = file.walk(false, |_, _| Visit::Continue).unwrap();
    let scanned = file.scan(false, |_, _| Visit::Continue).unwrap();

    assert_eq!(walked.pages_visited, 3);
    assert_eq!(scanned.pages_visited, 4);
    assert_eq!(scanned.leaf_entries, walked.leaf_entries + 1);
}

#[test]
fn test_single_page_lookup() {
    let (path, _dir) = write_file(&small_tree());
    let mut file = IndexFile::open(&path, layout()).unwrap();

    let page = file.page(PageId::new(2), true).unwrap();
    let leaf = page.as_leaf().unwrap();
    assert_eq!(leaf.entries.as_deref(), Some(&[Entry::new(8, "gamma")][..]));
}

#[test]
fn test_corrupt_meta_page_rejected_on_open() {
    let mut pages = small_tree();
    pages[0][0] = 1;
    let (path, _dir) = write_file(&pages);

    let err = IndexFile::open(&path, layout()).err().unwrap();
    assert!(matches!(err, Error::CorruptPage { expected: PageId(0), found: PageId(1) }));
}

#[test]
fn test_empty_file_rejected_on_open() {
    let (path, _dir) = write_file(&[]);
    let err = IndexFile::open(&path, layout()).err().unwrap();
    assert!(matches!(err, Error::OutOfRange { page_count: 0, .. }));
}

#[test]
fn test_page_size_too_small_rejected() {
    let (path, _dir) = write_file(&small_tree());
    let err = IndexFile::open(&path, Layout::with_page_size(8)).err().unwrap();
    assert!(matches!(err, Error::InvalidLayout(_)));
}

#[test]
fn test_wrong_page_size_detected_as_corruption() {
    // Reading 128-byte pages as 64-byte pages puts page ids at the wrong
    // offsets, which the identity check catches.
    let (path, _dir) = write_file(&small_tree());
    let mut file = IndexFile::open(&path, Layout::with_page_size(64)).unwrap();

    let err = file.walk(false, |_, _| Visit::Continue).unwrap_err();
    assert!(err.is_corruption());
}
