//! `parity-sieve`: Parity with the fewest pairs at one quadrance.
//!
//! For every mapping, counts the (codeword, neighbor) pairs at exactly
//! `quad` for each candidate parity and keeps the smallest count. The
//! candidates come from a parities file, one exponent vector per line, or
//! default to every canonical parity of the codelength.
//!
//! **Usage:**
//! ```text
//! parity-sieve <codelength> <quad> <constellation> <mappings> [parities] [--json] [-v...]
//! ```
//!
//! A mappings or parities path of `-` reads stdin (not both).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use spc_clients::{load_engine, mappings, open_input, Output};
use spc_search::{CanonicalParities, Parity, ParityReader, SieveConfig};
use tracing::info;

/// Sieve parities by their multiplicity at one quadrance.
#[derive(Parser)]
#[command(
    name = "parity-sieve",
    about = "Find the parity with the fewest codeword pairs at a given quadrance, per mapping"
)]
struct Args {
    /// Codelength n, with 2 <= n < q.
    codelength: usize,

    /// Quadrance whose multiplicity is minimized.
    quad: u32,

    /// Constellation file: whitespace-separated `x y` integer pairs.
    constellation: PathBuf,

    /// Mappings file, one permutation of 0..q per line (`-` for stdin).
    mappings: PathBuf,

    /// Parities file, one exponent vector per line (`-` for stdin).
    /// Every canonical parity is tried when omitted.
    parities: Option<PathBuf>,

    #[command(flatten)]
    output: Output,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.output.init_logging();

    let stdin = |p: &PathBuf| p.as_os_str() == "-";
    if stdin(&args.mappings) && args.parities.as_ref().is_some_and(stdin) {
        bail!("mappings and parities cannot both be read from stdin");
    }

    let engine = load_engine(&args.constellation)?;
    let config = SieveConfig::new(args.codelength, args.quad);

    // Candidates are read once and reused for every mapping.
    let parities: Vec<Parity> = match &args.parities {
        Some(path) => ParityReader::new(open_input(path)?, engine.field(), args.codelength)
            .collect::<spc_search::Result<_>>()
            .with_context(|| format!("reading parities {}", path.display()))?,
        None => CanonicalParities::new(engine.field(), args.codelength).collect(),
    };
    info!(candidates = parities.len(), "parities ready");

    for mapping in mappings(&args.mappings, engine.field().size())? {
        let mapping = mapping?;
        let report = engine
            .sieve(&mapping, &config, parities.iter().cloned())
            .with_context(|| format!("sieving mapping {mapping}"))?;
        args.output.emit(&report)?;
    }
    Ok(())
}
