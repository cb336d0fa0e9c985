//! `k`-subsets of `0..n` in co-lexicographic order.
//!
//! A subset is kept as its strictly increasing element list. The lowest
//! element that can move up without touching its successor is bumped and
//! everything below it restarts at `0, 1, 2, ...`:
//!
//! ```text
//! n = 4, k = 2:  01 02 12 03 13 23
//! ```
//!
//! The buffer is caller-owned so the walk can reuse one allocation for
//! every codeword.

/// Subsets of a fixed ground set `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combinations {
    n: usize,
}

impl Combinations {
    /// Subsets of `0..n`.
    #[inline]
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    /// Writes the first subset of size `subset.len()` into `subset`.
    ///
    /// Returns `false` if the ground set is too small to hold one.
    pub fn first(&self, subset: &mut [usize]) -> bool {
        for (i, s) in subset.iter_mut().enumerate() {
            *s = i;
        }
        subset.len() <= self.n
    }

    /// Steps `subset` to its co-lexicographic successor.
    ///
    /// Returns `false` after the last subset (`n-k, ..., n-1`), leaving the
    /// buffer unchanged.
    pub fn advance(&self, subset: &mut [usize]) -> bool {
        let k = subset.len();
        if k == 0 {
            return false;
        }
        let i = (0..k - 1)
            .find(|&i| subset[i] + 1 != subset[i + 1])
            .unwrap_or(k - 1);
        if i == k - 1 && subset[i] + 1 >= self.n {
            return false;
        }
        subset[i] += 1;
        for (j, s) in subset[..i].iter_mut().enumerate() {
            *s = j;
        }
        true
    }
}
