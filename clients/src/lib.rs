//! Plumbing shared by the search binaries.
//!
//! Opening inputs (`-` is stdin), loading the constellation into an
//! [`Engine`], installing the log subscriber and printing one report per
//! mapping, as text or JSON.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use serde::Serialize;
use spc_search::{read_constellation, Engine, Mapping, MappingReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output and logging flags common to every binary.
#[derive(Debug, Args)]
pub struct Output {
    /// Print one JSON document per mapping instead of text.
    #[arg(long)]
    pub json: bool,

    /// Log more to stderr: `-v` info, `-vv` debug. `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Output {
    /// Installs a stderr `fmt` subscriber at the requested verbosity.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    /// Writes `report` to stdout, as JSON if `--json` was given.
    ///
    /// # Errors
    ///
    /// Fails if serialization or writing to stdout fails.
    pub fn emit<T: Serialize + Display>(&self, report: &T) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.json {
            serde_json::to_writer(&mut out, report).context("serializing report")?;
            writeln!(out)?;
        } else {
            writeln!(out, "{report}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Opens `path` for buffered reading; `-` means stdin.
///
/// # Errors
///
/// Fails if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads the constellation at `path` and builds the matching engine.
///
/// # Errors
///
/// Fails if the file cannot be read, is malformed, or has a point count
/// without a supported field.
pub fn load_engine(path: &Path) -> Result<Engine> {
    let constellation = read_constellation(open_input(path)?)
        .with_context(|| format!("reading constellation {}", path.display()))?;
    let engine = Engine::new(constellation)
        .with_context(|| format!("constellation {}", path.display()))?;
    info!(
        path = %path.display(),
        points = engine.constellation().len(),
        poly = engine.field().poly(),
        "constellation loaded"
    );
    Ok(engine)
}

/// Mappings read from `path`, each error tagged with the file name.
///
/// # Errors
///
/// Fails if the file cannot be opened; per-line errors are yielded by the
/// iterator.
pub fn mappings(path: &Path, size: usize) -> Result<impl Iterator<Item = Result<Mapping>>> {
    let owned: PathBuf = path.to_owned();
    let reader = MappingReader::new(open_input(path)?, size);
    Ok(reader.map(move |m| m.with_context(|| format!("mappings {}", owned.display()))))
}
