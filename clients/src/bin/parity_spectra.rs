//! `parity-spectra`: Distance spectrum of every canonical parity.
//!
//! For every mapping, prints one line per canonical parity of the given
//! codelength: exponents, coefficients, and the pair counts from `qmin` to
//! `qmax - 1` with their total. No parity is dropped early.
//!
//! **Usage:**
//! ```text
//! parity-spectra <codelength> <qmax> <constellation> <mappings> [--qmin N] [--json] [-v...]
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

/// Tabulate the spectrum of every canonical parity, per mapping.
#[derive(Parser)]
#[command(
    name = "parity-spectra",
    about = "Print the distance spectrum of every canonical parity, per mapping"
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

    /// First quadrance printed.
    #[arg(long, default_value_t = SearchConfig::DEFAULT_QMIN)]
    qmin: u32,

    #[command(flatten)]
    output: Output,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.output.init_logging();

    let engine = load_engine(&args.constellation)?;
    let config = SearchConfig::new(args.codelength, args.qmax).with_qmin(args.qmin);

    for mapping in mappings(&args.mappings, engine.field().size())? {
        let mapping = mapping?;
        let table = engine
            .spectra(&mapping, &config)
            .with_context(|| format!("tabulating mapping {mapping}"))?;
        args.output.emit(&table)?;
    }
    Ok(())
}
