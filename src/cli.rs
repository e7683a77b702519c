//! Command-line front end: argument parsing and the report run.
//!
//! The binary only parses arguments, sets up logging and maps the result of
//! [`run`] to a process exit code. Everything else lives here so it can be
//! driven from tests with an in-memory writer.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use crate::common::config::DEFAULT_PAGE_SIZE;
use crate::index::btree::{IndexFile, Visit, WalkSummary};
use crate::report::Reporter;
use crate::storage::page::Page;
use crate::Layout;

/// Decode and check a B-tree index file
#[derive(Parser, Debug)]
#[command(name = "btree-inspect", version, about)]
pub struct Args {
    /// Index file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Page size the file was written with
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "BTREE_PAGE_SIZE")]
    pub page_size: usize,

    /// Decode and print leaf entries
    #[arg(short, long)]
    pub entries: bool,

    /// Decode every physical page in file order instead of walking the tree
    #[arg(long)]
    pub scan: bool,

    /// Stop after this many pages (at least 1)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level for the `-v` count; `RUST_LOG` can still override it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Open the file named by `args`, render every visited page to `out` and
/// finish with a summary line.
///
/// With `--max-pages N` exactly `N` pages are rendered before the walk is
/// stopped.
pub fn run<W: Write>(args: &Args, out: W) -> Result<WalkSummary> {
    let layout = Layout::with_page_size(args.page_size);
    let mut file = IndexFile::open(&args.file, layout)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    let mut reporter = Reporter::new(out);
    reporter.meta(file.meta()).context("failed to write report")?;

    let limit = args.max_pages.unwrap_or(u64::MAX);
    let mut rendered = 0u64;
    let mut write_err = None;
    let visit = |page: &Page, depth: usize| {
        if let Err(e) = reporter.page(page, depth) {
            write_err = Some(e);
            return Visit::Stop;
        }
        rendered += 1;
        if rendered >= limit {
            Visit::Stop
        } else {
            Visit::Continue
        }
    };

    let summary = if args.scan {
        file.scan(args.entries, visit)
    } else {
        file.walk(args.entries, visit)
    }
    .with_context(|| format!("failed to read {}", args.file.display()))?;

    if let Some(e) = write_err {
        return Err(e).context("failed to write report");
    }
    reporter.summary(&summary).context("failed to write report")?;
    reporter
        .into_inner()
        .flush()
        .context("failed to write report")?;
    Ok(summary)
}

/// Process exit status for a finished run: 0 on success, 1 on any failure.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
