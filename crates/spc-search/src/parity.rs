//! Single parity checks in canonical form.
//!
//! A parity `h` of length `n` stores discrete logarithms: it encodes the
//! constraint `Σ alpha^h[i] · x[i] = 0`. Scaling every coefficient by the
//! same non-zero constant, or permuting coordinates, leaves the distance
//! spectrum unchanged, so only the canonical representatives
//!
//! ```text
//! h[0] >= h[1] >= ... >= h[n-2] >= 1,   h[n-1] = 0
//! ```
//!
//! are searched, with every exponent at most `q - 2`. The last coefficient
//! is `alpha^0 = 1`, which is what lets the coset enumerator solve for the
//! last coordinate directly.
//!
//! # Example
//!
//! ```
//! use spc_search::field::Field;
//! use spc_search::parity::CanonicalParities;
//!
//! let gf4 = Field::with_degree(2).unwrap();
//! let all: Vec<Vec<u32>> = CanonicalParities::new(&gf4, 3)
//!     .map(|h| h.exponents().to_vec())
//!     .collect();
//! assert_eq!(all, vec![vec![1, 1, 0], vec![2, 1, 0], vec![2, 2, 0]]);
//! ```

use crate::error::{Error, Result};
use crate::field::{Elt, Field};

/// Exponent vector of one parity check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parity {
    exponents: Vec<u32>,
}

impl Parity {
    /// Wraps an exponent vector that is already canonical.
    ///
    /// # Errors
    ///
    /// [`Error::ParityLength`] for fewer than two coefficients,
    /// [`Error::NonCanonicalParity`] if an exponent is `>= q - 1`, the
    /// vector increases somewhere, or the last exponent is not 0.
    pub fn new(exponents: Vec<u32>, field: &Field) -> Result<Self> {
        if exponents.len() < 2 {
            return Err(Error::ParityLength {
                expected: 2,
                found: exponents.len(),
            });
        }
        let reason = if exponents.iter().any(|&e| e as usize >= field.order()) {
            Some("exponent not below q - 1")
        } else if exponents.windows(2).any(|w| w[0] < w[1]) {
            Some("exponents must be non-increasing")
        } else if exponents.last() != Some(&0) {
            Some("last exponent must be 0")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(Error::NonCanonicalParity { exponents, reason }),
            None => Ok(Self { exponents }),
        }
    }

    /// Brings arbitrary exponents to canonical form: reduce modulo `q - 1`,
    /// sort non-increasing, then scale so the last exponent is 0.
    ///
    /// # Errors
    ///
    /// [`Error::ParityLength`] for fewer than two coefficients.
    pub fn canonical(mut exponents: Vec<u32>, field: &Field) -> Result<Self> {
        let order = field.order() as u32;
        for e in exponents.iter_mut() {
            *e %= order;
        }
        exponents.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(&min) = exponents.last() {
            for e in exponents.iter_mut() {
                *e -= min;
            }
        }
        Self::new(exponents, field)
    }

    /// Codelength `n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// Always false: a parity has at least two coefficients.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Discrete logarithms of the coefficients.
    #[inline]
    pub fn exponents(&self) -> &[u32] {
        &self.exponents
    }

    /// Explicit coefficients `alpha^h[i]`.
    pub fn coefficients(&self, field: &Field) -> Vec<Elt> {
        self.exponents.iter().map(|&e| field.exp(e)).collect()
    }

    /// `Σ alpha^h[i] · x[i]` over all coordinates.
    pub fn syndrome(&self, field: &Field, word: &[Elt]) -> Elt {
        let mut acc = 0;
        for (&h, &x) in self.exponents.iter().zip(word) {
            field.mul_acc(&mut acc, h, x);
        }
        acc
    }

    /// True if `word` satisfies the constraint.
    pub fn check(&self, field: &Field, word: &[Elt]) -> bool {
        word.len() == self.len() && self.syndrome(field, word) == 0
    }
}

/// Iterator over the canonical parities of one length.
///
/// Positions `0..n-1` behave as an odometer whose lowest position moves
/// fastest; after a carry every lower position restarts at the new value
/// so the vector stays non-increasing.
#[derive(Debug, Clone)]
pub struct CanonicalParities {
    top: u32,
    next: Option<Vec<u32>>,
}

impl CanonicalParities {
    /// Canonical parities of length `length` over `field`.
    ///
    /// Empty when `length < 2` or the field has fewer than three elements.
    pub fn new(field: &Field, length: usize) -> Self {
        let top = field.order().saturating_sub(1) as u32;
        let next = (length >= 2 && top >= 1).then(|| {
            let mut h = vec![1; length];
            h[length - 1] = 0;
            h
        });
        Self { top, next }
    }

    /// Number of canonical parities: multisets of size `n - 1` drawn from
    /// `1..=q-2`.
    pub fn total(field: &Field, length: usize) -> u128 {
        let kinds = field.order().saturating_sub(1) as u128;
        if length < 2 || kinds == 0 {
            return 0;
        }
        let k = (length - 1) as u128;
        binomial(kinds + k - 1, k)
    }

    fn advance(&mut self) {
        let Some(h) = self.next.as_mut() else {
            return;
        };
        let free = h.len() - 1;
        match h[..free].iter().position(|&e| e < self.top) {
            Some(i) => {
                h[i] += 1;
                let v = h[i];
                h[..i].fill(v);
            }
            None => self.next = None,
        }
    }
}

impl Iterator for CanonicalParities {
    type Item = Parity;

    fn next(&mut self) -> Option<Parity> {
        let current = self.next.clone()?;
        self.advance();
        Some(Parity {
            exponents: current,
        })
    }
}

fn binomial(n: u128, k: u128) -> u128 {
    let k = k.min(n.saturating_sub(k));
    (0..k).fold(1u128, |acc, i| acc * (n - i) / (i + 1))
}
