//! Search parameters.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::neighbors::Neighborhood;

/// Parameters of a spectrum search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Codelength `n`, `2 <= n < q`.
    pub length: usize,
    /// First quadrance taken into account when comparing spectra.
    ///
    /// Quadrance 0 only ever holds the codewords themselves, so the default
    /// of 1 leaves it out.
    pub qmin: u32,
    /// Exclusive bound on recorded quadrances.
    pub qmax: u32,
    /// Drop a parity as soon as its partial spectrum loses to the best.
    pub early_abort: bool,
}

impl SearchConfig {
    /// Default qmin.
    pub const DEFAULT_QMIN: u32 = 1;

    /// Config with `qmin = 1` and early abort on.
    pub fn new(length: usize, qmax: u32) -> Self {
        Self {
            length,
            qmin: Self::DEFAULT_QMIN,
            qmax,
            early_abort: true,
        }
    }

    /// Sets `qmin`.
    #[must_use]
    pub fn with_qmin(mut self, qmin: u32) -> Self {
        self.qmin = qmin;
        self
    }

    /// Turns early abort on or off.
    #[must_use]
    pub fn with_early_abort(mut self, early_abort: bool) -> Self {
        self.early_abort = early_abort;
        self
    }

    /// Checks the config against the field it will run over.
    ///
    /// A `qmin` at or above `qmax` is accepted: every spectrum then
    /// compares equal.
    ///
    /// # Errors
    ///
    /// [`Error::CodeLength`] unless `2 <= length < q`.
    pub fn validate(&self, field: &Field) -> Result<()> {
        check_length(self.length, field)
    }

    /// Checks `qmax` against the quadrances `neighbors` can produce.
    ///
    /// No pair of codewords lies farther apart than `n` times the largest
    /// point quadrance, so a larger bound only sizes spectra for counts
    /// that stay zero.
    ///
    /// # Errors
    ///
    /// [`Error::QuadranceBound`] if `qmax` exceeds that distance plus one.
    pub fn check_bound(&self, neighbors: &Neighborhood) -> Result<()> {
        let limit = self.length as u64 * u64::from(neighbors.max_quadrance()) + 1;
        if u64::from(self.qmax) > limit {
            return Err(Error::QuadranceBound {
                qmax: self.qmax,
                limit,
            });
        }
        Ok(())
    }
}

/// Parameters of a partition sieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveConfig {
    /// Codelength `n`, `2 <= n < q`.
    pub length: usize,
    /// Quadrance whose multiplicity is minimized.
    pub quad: u32,
}

impl SieveConfig {
    /// Sieve for `quad` at codelength `length`.
    pub fn new(length: usize, quad: u32) -> Self {
        Self { length, quad }
    }

    /// Checks the config against the field it will run over.
    ///
    /// # Errors
    ///
    /// [`Error::CodeLength`] unless `2 <= length < q`.
    pub fn validate(&self, field: &Field) -> Result<()> {
        check_length(self.length, field)
    }
}

fn check_length(length: usize, field: &Field) -> Result<()> {
    if length < 2 || length >= field.size() {
        return Err(Error::CodeLength {
            length,
            size: field.size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::{Constellation, Mapping, Point};

    #[test]
    fn defaults() {
        let c = SearchConfig::new(3, 20);
        assert_eq!(c.qmin, 1);
        assert!(c.early_abort);
        let c = c.with_qmin(8).with_early_abort(false);
        assert_eq!((c.qmin, c.early_abort), (8, false));
    }

    #[test]
    fn codelength_bounds() {
        let f = Field::with_degree(2).unwrap();
        assert!(SearchConfig::new(2, 9).validate(&f).is_ok());
        assert!(SearchConfig::new(3, 9).validate(&f).is_ok());
        for n in [0, 1, 4, 5] {
            assert!(matches!(
                SearchConfig::new(n, 9).validate(&f),
                Err(Error::CodeLength { size: 4, .. })
            ));
        }
        assert!(SieveConfig::new(4, 8).validate(&f).is_err());
        // GF(2) admits no codelength at all.
        let f = Field::with_degree(1).unwrap();
        assert!(SieveConfig::new(2, 1).validate(&f).is_err());
    }

    #[test]
    fn qmax_stays_within_reach() {
        let c = Constellation::new(vec![
            Point::new(-1, -1),
            Point::new(1, -1),
            Point::new(-1, 1),
            Point::new(1, 1),
        ])
        .unwrap();
        let nb = Neighborhood::new(&c, &Mapping::identity(4)).unwrap();
        assert!(SearchConfig::new(3, 25).check_bound(&nb).is_ok());
        assert!(SearchConfig::new(2, 17).check_bound(&nb).is_ok());
        assert!(matches!(
            SearchConfig::new(3, 26).check_bound(&nb),
            Err(Error::QuadranceBound { qmax: 26, limit: 25 })
        ));
        assert!(matches!(
            SearchConfig::new(3, u32::MAX).check_bound(&nb),
            Err(Error::QuadranceBound { limit: 25, .. })
        ));
    }
}
