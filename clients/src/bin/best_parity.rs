//! `best-parity`: Best single-parity check per mapping.
//!
//! For every mapping in the mappings file, enumerates the canonical
//! parities of the given codelength over GF(q) and prints each parity that
//! improves on (or ties) the best distance spectrum seen so far. The last
//! line of a report is the winner.
//!
//! **Usage:**
//! ```text
//! best-parity <codelength> <qmax> <constellation> <mappings> [--qmin N] [--no-early-abort] [--json] [-v...]
//! ```
//!
//! A mappings path of `-` reads stdin.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spc_clients::{load_engine, mappings, Output};
use spc_search::SearchConfig;

/// Search the best SPC parity for each constellation mapping.
#[derive(Parser)]
#[command(
    name = "best-parity",
    about = "Find the single-parity check with the best distance spectrum, per mapping"
)]
struct Args {
    /// Codelength n, with 2 <= n < q.
    codelength: usize,

    /// Exclusive upper bound on the quadrances counted.
    qmax: u32,

    /// Constellation file: whitespace-separated `x y` integer pairs.
    constellation: PathBuf,

    /// Mappings file, one permutation of 0..q per line (`-` for stdin).
    mappings: PathBuf,

    /// First quadrance compared between spectra.
    #[arg(long, default_value_t = SearchConfig::DEFAULT_QMIN)]
    qmin: u32,

    /// Evaluate every parity completely instead of dropping those that
    /// fall behind.
    #[arg(long)]
    no_early_abort: bool,

    #[command(flatten)]
    output: Output,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.output.init_logging();

    let engine = load_engine(&args.constellation)?;
    let config = SearchConfig::new(args.codelength, args.qmax)
        .with_qmin(args.qmin)
        .with_early_abort(!args.no_early_abort);

    for mapping in mappings(&args.mappings, engine.field().size())? {
        let mapping = mapping?;
        let report = engine
            .best_parity(&mapping, &config)
            .with_context(|| format!("searching mapping {mapping}"))?;
        args.output.emit(&report)?;
    }
    Ok(())
}
