//! Distance-spectrum search for single-parity-check codes over GF(2^m).
//!
//! A code of length `n` over GF(q), `q = 2^m`, is defined by one parity
//! check `Σ alpha^h[i] · x[i] = 0`. Its codewords are sent on a 2D
//! constellation of `q` points through a mapping from field elements to
//! points, so every pair of codewords sits at some squared Euclidean
//! distance (quadrance). This crate looks for the parity, per mapping,
//! whose near pairs are fewest.
//!
//! # Pipeline
//!
//! ```text
//! mapping ──► Neighborhood (Q, V) ──► Cutoffs
//!                                       │
//! CanonicalParities ──► Coset ──► NeighborWalk ──► Spectrum ──► Strategy ──► champions
//! ```
//!
//! - [`field`]: log/antilog tables, multiply-accumulate.
//! - [`parity`]: canonical parity vectors and their enumeration.
//! - [`coset`]: codewords of one parity.
//! - [`neighbors`]: quadrance matrix, distance rankings, rank cutoffs.
//! - [`walk`]: pruned Gray-code walk over the near neighbors of a codeword.
//! - [`spectrum`]: histograms and their order.
//! - [`strategy`] and [`sieve`]: scoring strategies and the
//!   branch-and-bound driver.
//! - [`search`]: one call per mapping.
//!
//! # Example
//!
//! ```
//! use spc_search::{Constellation, Engine, Mapping, Point, SearchConfig};
//!
//! let square = Constellation::new(vec![
//!     Point::new(-1, -1),
//!     Point::new(1, -1),
//!     Point::new(-1, 1),
//!     Point::new(1, 1),
//! ])?;
//! let engine = Engine::new(square)?;
//! let report = engine.best_parity(&Mapping::identity(4), &SearchConfig::new(3, 20))?;
//!
//! let best = report.best().map(|c| c.parity.exponents().to_vec());
//! assert_eq!(best, Some(vec![2, 1, 0]));
//! # Ok::<(), spc_search::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod combination;
pub mod config;
pub mod constellation;
pub mod coset;
pub mod error;
pub mod field;
pub mod neighbors;
pub mod parity;
pub mod partition;
pub mod report;
pub mod search;
pub mod sieve;
pub mod source;
pub mod spectrum;
pub mod strategy;
pub mod table;
pub mod walk;

pub use config::{SearchConfig, SieveConfig};
pub use constellation::{Constellation, Mapping, Point};
pub use coset::Coset;
pub use error::{Error, Result};
pub use field::{Elt, Field};
pub use neighbors::{Cutoffs, Neighborhood};
pub use parity::{CanonicalParities, Parity};
pub use report::{Bounds, Champion, MappingReport, Scored, SpectraTable};
pub use search::Engine;
pub use sieve::SieveStrategy;
pub use source::{read_constellation, MappingReader, ParityReader};
pub use spectrum::{Spectrum, SpectrumScore};
pub use strategy::{Outcome, SpectrumStrategy, Strategy, Verdict};
pub use walk::NeighborWalk;
