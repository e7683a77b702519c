//! btree-inspect command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Walk the tree and print page headers
//! btree-inspect btree.idx
//!
//! # Include leaf entries, 128-byte pages
//! btree-inspect --page-size 128 --entries btree.idx
//!
//! # Decode every physical page instead of following the tree
//! btree-inspect --scan btree.idx
//! ```

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;

use btree_inspect::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let result = cli::run(&args, BufWriter::new(stdout.lock()));
    if let Err(e) = &result {
        eprintln!("error: {:#}", e);
    }
    ExitCode::from(cli::exit_status(&result))
}
