//! Error type shared by every stage of a search.
//!
//! All variants are configuration or resource failures: the caller handed
//! the engine an instance it cannot search. None of them is transient.

use thiserror::Error;

/// Failure raised while setting up or feeding a search.
#[derive(Debug, Error)]
pub enum Error {
    /// No primitive polynomial is tabulated for this extension degree.
    #[error("unsupported field degree {degree} (expected 1..={max})")]
    UnsupportedDegree {
        /// Requested degree `m` of GF(2^m).
        degree: u32,
        /// Largest tabulated degree.
        max: u32,
    },

    /// The polynomial does not generate the full multiplicative group.
    #[error("polynomial {poly:#x} is not primitive: cycle of alpha has length {cycle}, expected {expected}")]
    NotPrimitive {
        /// Binary representation of the polynomial.
        poly: u32,
        /// Number of steps after which the power sequence returned to 1 (or hit 0).
        cycle: usize,
        /// `q - 1`.
        expected: usize,
    },

    /// Codelength must satisfy `2 <= n < q`.
    #[error("codelength {length} out of range for GF({size}) (expected 2..{size})")]
    CodeLength {
        /// Requested codelength.
        length: usize,
        /// Field size `q`.
        size: usize,
    },

    /// The constellation does not have `2^m` points with `1 <= m <= 10`.
    #[error("constellation has {count} points, expected a power of two between 2 and 1024")]
    ConstellationSize {
        /// Number of points read.
        count: usize,
    },

    /// A mapping entry points outside the constellation.
    #[error("mapping value {value} out of range (constellation has {size} points)")]
    MappingOutOfRange {
        /// Offending entry.
        value: usize,
        /// Field size `q`.
        size: usize,
    },

    /// A mapping sends two field elements to the same point.
    #[error("mapping is not a permutation: point {value} assigned twice")]
    MappingRepeated {
        /// Point index that appears more than once.
        value: usize,
    },

    /// A mapping record holds the wrong number of entries.
    #[error("incomplete mapping: expected {expected} values, found {found}")]
    MappingLength {
        /// Field size `q`.
        expected: usize,
        /// Number of values on the record.
        found: usize,
    },

    /// A parity record holds the wrong number of exponents.
    #[error("parity has {found} coefficients, expected {expected}")]
    ParityLength {
        /// Codelength `n`.
        expected: usize,
        /// Number of exponents supplied.
        found: usize,
    },

    /// A parity vector violates the canonical form.
    #[error("parity {exponents:?} is not canonical: {reason}")]
    NonCanonicalParity {
        /// Offending exponents.
        exponents: Vec<u32>,
        /// Which rule is broken.
        reason: &'static str,
    },

    /// Squared distances between two points do not fit in 32 bits.
    #[error("quadrance between points {a} and {b} overflows u32")]
    QuadranceOverflow {
        /// First point index.
        a: usize,
        /// Second point index.
        b: usize,
    },

    /// Rank cutoffs do not fit the walk they are handed to.
    #[error("cutoffs cover codelength {covered_length} over {covered_size} elements, walk needs codelength {length} over {size}")]
    CutoffsMismatch {
        /// Codelength of the walk.
        length: usize,
        /// Field size of the walk's neighborhood.
        size: usize,
        /// Largest codelength the cutoffs have rows for.
        covered_length: usize,
        /// Field size the cutoffs were built over.
        covered_size: usize,
    },

    /// The quadrance bound lies past every pair the code can produce.
    #[error("qmax {qmax} exceeds {limit}, one past the largest pair quadrance")]
    QuadranceBound {
        /// Requested exclusive bound.
        qmax: u32,
        /// `n` times the largest point quadrance, plus one.
        limit: u64,
    },

    /// A token in an input stream could not be parsed.
    #[error("line {line}: malformed {what} '{token}'")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was expected at that position.
        what: &'static str,
        /// Offending text.
        token: String,
    },

    /// A record of an input stream was rejected.
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number of the record.
        line: usize,
        /// Why the record was rejected.
        #[source]
        source: Box<Error>,
    },

    /// Underlying reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Tags the error with the input line it came from.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            e @ (Error::Malformed { .. } | Error::AtLine { .. } | Error::Io(_)) => e,
            e => Error::AtLine {
                line,
                source: Box::new(e),
            },
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
