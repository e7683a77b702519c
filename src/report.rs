//! Human-readable rendering of decoded pages.

use std::fmt::Display;
use std::io::{self, Write};

use crate::index::btree::WalkSummary;
use crate::storage::page::{IndexPage, LeafPage, MetaPage, Page};

/// Writes one line per page, indented by tree depth.
///
/// # Example
/// ```
/// use btree_inspect::report::Reporter;
/// use btree_inspect::storage::page::MetaPage;
/// use btree_inspect::PageId;
///
/// let mut out = Vec::new();
/// Reporter::new(&mut out)
///     .meta(&MetaPage { page_id: PageId::new(0), root_page_id: PageId::new(3), level_count: 2 })
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "[meta] page_id=0 root_page_id=3 levels=2\n");
/// ```
pub struct Reporter<W> {
    out: W,
    indent: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, indent: 2 }
    }

    pub fn meta(&mut self, meta: &MetaPage) -> io::Result<()> {
        writeln!(
            self.out,
            "[meta] page_id={} root_page_id={} levels={}",
            meta.page_id.0, meta.root_page_id.0, meta.level_count
        )
    }

    /// Render a decoded page at `depth`.
    pub fn page(&mut self, page: &Page, depth: usize) -> io::Result<()> {
        match page {
            Page::Meta(meta) => self.meta(meta),
            Page::Leaf(leaf) => self.leaf(leaf, depth),
            Page::Index(index) => self.index(index, depth),
        }
    }

    fn leaf(&mut self, leaf: &LeafPage, depth: usize) -> io::Result<()> {
        let pad = depth * self.indent;
        writeln!(
            self.out,
            "{:pad$}[leaf] [page_id {}] available={} entry_count={} parent={} prev={} next={}",
            "",
            leaf.page_id.0,
            leaf.available_bytes,
            leaf.entry_count,
            leaf.parent.0,
            leaf.prev_leaf.0,
            leaf.next_leaf.0,
        )?;
        for entry in leaf.entries.iter().flatten() {
            writeln!(self.out, "{:pad$}{}", "", entry, pad = pad + self.indent)?;
        }
        Ok(())
    }

    fn index(&mut self, index: &IndexPage, depth: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "{:pad$}[index] [page_id {}] degree={} entry_count={} keys={} children={}",
            "",
            index.page_id.0,
            index.degree,
            index.entry_count,
            list(&index.keys),
            list(index.children.iter().map(|c| c.0)),
            pad = depth * self.indent,
        )
    }

    pub fn summary(&mut self, summary: &WalkSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "{} pages ({} index, {} leaf), {} entries, depth {}{}",
            summary.pages_visited,
            summary.index_pages,
            summary.leaf_pages,
            summary.leaf_entries,
            summary.max_depth + usize::from(summary.pages_visited > 0),
            if summary.stopped { ", stopped early" } else { "" }
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(","))
}
