//! Codewords of a single-parity-check code.
//!
//! For a canonical parity `h` the code is the set of `x` with
//! `Σ alpha^h[i] · x[i] = 0`. Since `h[n-1] = 0` the last coefficient is 1
//! and the last coordinate is simply the sum of the others, so the free
//! coordinates `x[0..n-1]` run over every tuple in `GF(q)^(n-1)`.

use crate::field::{Elt, Field};
use crate::parity::Parity;

/// The codewords of one parity over one field.
#[derive(Debug, Clone, Copy)]
pub struct Coset<'a> {
    field: &'a Field,
    parity: &'a Parity,
}

impl<'a> Coset<'a> {
    /// Coset of `parity` over `field`.
    pub fn new(field: &'a Field, parity: &'a Parity) -> Self {
        Self { field, parity }
    }

    /// Codelength `n`.
    #[inline]
    pub fn length(&self) -> usize {
        self.parity.len()
    }

    /// Number of codewords, `q^(n-1)`; `None` if it overflows `u128`.
    pub fn size(&self) -> Option<u128> {
        let exp = u32::try_from(self.length().saturating_sub(1)).ok()?;
        (self.field.size() as u128).checked_pow(exp)
    }

    /// Resets `word` to the all-zero codeword.
    ///
    /// `word` must have length `n`.
    pub fn first(&self, word: &mut [Elt]) {
        debug_assert_eq!(word.len(), self.length());
        word.fill(0);
    }

    /// Steps `word` to the next codeword.
    ///
    /// The free coordinates form a base-`q` odometer whose coordinate 0
    /// moves fastest; the last coordinate is recomputed from them. Returns
    /// `false` once the odometer wraps back to zero, leaving `word` at the
    /// all-zero codeword.
    pub fn advance(&self, word: &mut [Elt]) -> bool {
        let n = word.len();
        debug_assert_eq!(n, self.length());
        let top = (self.field.size() - 1) as Elt;
        let free = &mut word[..n - 1];

        let mut carried = true;
        for digit in free.iter_mut() {
            if *digit < top {
                *digit += 1;
                carried = false;
                break;
            }
            *digit = 0;
        }
        if carried {
            word[n - 1] = 0;
            return false;
        }

        let h = self.parity.exponents();
        let mut last = 0;
        for (&hi, &xi) in h.iter().zip(&word[..n - 1]) {
            self.field.mul_acc(&mut last, hi, xi);
        }
        word[n - 1] = last;
        true
    }

    /// Iterator over owned codewords, starting with the all-zero word.
    pub fn iter(&self) -> Codewords<'a> {
        Codewords {
            coset: *self,
            word: vec![0; self.length()],
            done: self.length() == 0,
        }
    }
}

/// Owned-item iterator returned by [`Coset::iter`].
///
/// The search loops use [`Coset::first`]/[`Coset::advance`] on a reused
/// buffer instead; this form is for tests and one-off inspection.
#[derive(Debug, Clone)]
pub struct Codewords<'a> {
    coset: Coset<'a>,
    word: Vec<Elt>,
    done: bool,
}

impl Iterator for Codewords<'_> {
    type Item = Vec<Elt>;

    fn next(&mut self) -> Option<Vec<Elt>> {
        if self.done {
            return None;
        }
        let current = self.word.clone();
        self.done = !self.coset.advance(&mut self.word);
        Some(current)
    }
}
