//! Search results in printable and serializable form.
//!
//! Lines follow the layout of the search tools: exponents, then explicit
//! coefficients, then the score, tab separated.
//!
//! ```text
//!  2  1  0 	3 2 1	0	0	0	0	0	0	0	48	0	0	0	128	0	0	0	48	0	0	0	(224)
//! ```

use core::fmt;

use crate::constellation::Mapping;
use crate::field::{Elt, Field};
use crate::parity::Parity;

/// A parity with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scored<S> {
    /// Canonical parity.
    pub parity: Parity,
    /// `alpha^h[i]` for each exponent.
    pub coefficients: Vec<Elt>,
    /// Strategy-specific score.
    pub score: S,
}

/// A parity that beat (or tied) every parity evaluated before it.
pub type Champion<S> = Scored<S>;

impl<S> Scored<S> {
    /// Pairs `parity` with `score`, expanding the coefficients over `field`.
    pub fn new(field: &Field, parity: Parity, score: S) -> Self {
        Self {
            coefficients: parity.coefficients(field),
            parity,
            score,
        }
    }
}

impl<S: fmt::Display> fmt::Display for Scored<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in self.parity.exponents() {
            write!(f, "{e:>2} ")?;
        }
        f.write_str("\t")?;
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "\t{}", self.score)
    }
}

/// What a search was scoring against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Bounds {
    /// Spectra over `qmin..qmax`.
    Spectrum {
        /// First compared quadrance.
        qmin: u32,
        /// Exclusive upper quadrance.
        qmax: u32,
    },
    /// Multiplicity of one quadrance.
    Sieve {
        /// Target quadrance.
        quad: u32,
    },
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spectrum { qmin, qmax } => write!(f, "qmin: {qmin}, qmax: {qmax}"),
            Self::Sieve { quad } => write!(f, "quad: {quad}"),
        }
    }
}

/// Everything one mapping produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MappingReport<S> {
    /// Mapping searched.
    pub mapping: Mapping,
    /// Field size `q`.
    pub size: usize,
    /// Codelength `n`.
    pub length: usize,
    /// Score bounds.
    pub bounds: Bounds,
    /// Successive champions, the last one being the best.
    pub champions: Vec<Champion<S>>,
    /// Parities scored.
    pub evaluated: u64,
    /// Parities dropped before their score was complete.
    pub abandoned: u64,
}

impl<S> MappingReport<S> {
    /// Best parity of the run, if any parity was evaluated to completion.
    pub fn best(&self) -> Option<&Champion<S>> {
        self.champions.last()
    }
}

impl<S: fmt::Display> fmt::Display for MappingReport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mapping: {}", self.mapping)?;
        writeln!(
            f,
            "GF({}), codelength: {}, {}",
            self.size, self.length, self.bounds
        )?;
        for c in &self.champions {
            writeln!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Score of every canonical parity for one mapping, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpectraTable<S> {
    /// Mapping searched.
    pub mapping: Mapping,
    /// Field size `q`.
    pub size: usize,
    /// Codelength `n`.
    pub length: usize,
    /// Score bounds.
    pub bounds: Bounds,
    /// One row per parity.
    pub rows: Vec<Scored<S>>,
}

impl<S: fmt::Display> fmt::Display for SpectraTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mapping: {}", self.mapping)?;
        writeln!(
            f,
            "GF({}), codelength: {}, {}",
            self.size, self.length, self.bounds
        )?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
