//! Per-mapping search entry points.
//!
//! An [`Engine`] owns the field and the constellation for a whole run.
//! Each call takes one mapping, rebuilds the neighbor tables for it and
//! runs a strategy over the parities; mappings are independent of each
//! other.

use tracing::info;

use crate::config::{SearchConfig, SieveConfig};
use crate::constellation::{Constellation, Mapping};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::neighbors::{Cutoffs, Neighborhood};
use crate::parity::{CanonicalParities, Parity};
use crate::report::{Bounds, MappingReport, Scored, SpectraTable};
use crate::sieve::SieveStrategy;
use crate::spectrum::SpectrumScore;
use crate::strategy::{search, SpectrumStrategy, Strategy};
use crate::walk::NeighborWalk;

/// Field and constellation shared by every mapping of a run.
#[derive(Debug, Clone)]
pub struct Engine {
    field: Field,
    constellation: Constellation,
}

impl Engine {
    /// Engine over GF(2^m) for a constellation of `2^m` points.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDegree`] if no primitive polynomial is tabulated
    /// for the constellation's degree.
    pub fn new(constellation: Constellation) -> Result<Self> {
        let field = Field::with_degree(constellation.degree())?;
        Ok(Self {
            field,
            constellation,
        })
    }

    /// The field.
    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The constellation.
    #[inline]
    pub fn constellation(&self) -> &Constellation {
        &self.constellation
    }

    fn neighborhood(&self, mapping: &Mapping, length: usize) -> Result<Neighborhood> {
        let neighbors = Neighborhood::new(&self.constellation, mapping)?;
        info!(
            q = self.field.size(),
            length,
            mapping = %mapping,
            min_quadrance = neighbors.min_quadrance(),
            "neighbor tables built"
        );
        Ok(neighbors)
    }

    /// Best parity for `mapping` under the spectrum order.
    ///
    /// # Errors
    ///
    /// [`Error::CodeLength`] for an invalid codelength,
    /// [`Error::QuadranceBound`] for a `qmax` past every reachable
    /// quadrance, and the errors of [`Neighborhood::new`].
    pub fn best_parity(
        &self,
        mapping: &Mapping,
        config: &SearchConfig,
    ) -> Result<MappingReport<SpectrumScore>> {
        config.validate(&self.field)?;
        let neighbors = self.neighborhood(mapping, config.length)?;
        config.check_bound(&neighbors)?;
        let cutoffs = Cutoffs::new(&neighbors, config.length, config.qmax);
        let walk = NeighborWalk::new(&self.field, &neighbors, &cutoffs, config.length)?;
        let mut strategy =
            SpectrumStrategy::new(&self.field, walk, config.qmin, config.early_abort);

        let outcome = search(
            &mut strategy,
            &self.field,
            CanonicalParities::new(&self.field, config.length),
        );
        info!(
            evaluated = outcome.evaluated,
            abandoned = outcome.abandoned,
            champions = outcome.champions.len(),
            "mapping done"
        );
        Ok(MappingReport {
            mapping: mapping.clone(),
            size: self.field.size(),
            length: config.length,
            bounds: Bounds::Spectrum {
                qmin: config.qmin,
                qmax: config.qmax,
            },
            champions: outcome.champions,
            evaluated: outcome.evaluated,
            abandoned: outcome.abandoned,
        })
    }

    /// Full spectrum of every canonical parity for `mapping`.
    ///
    /// `config.early_abort` is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`best_parity`](Self::best_parity).
    pub fn spectra(
        &self,
        mapping: &Mapping,
        config: &SearchConfig,
    ) -> Result<SpectraTable<SpectrumScore>> {
        config.validate(&self.field)?;
        let neighbors = self.neighborhood(mapping, config.length)?;
        config.check_bound(&neighbors)?;
        let cutoffs = Cutoffs::new(&neighbors, config.length, config.qmax);
        let walk = NeighborWalk::new(&self.field, &neighbors, &cutoffs, config.length)?;
        let mut strategy = SpectrumStrategy::new(&self.field, walk, config.qmin, false);

        let rows = CanonicalParities::new(&self.field, config.length)
            .map(|parity| {
                strategy.evaluate(&parity, None);
                Scored::new(&self.field, parity, strategy.score().clone())
            })
            .collect();
        Ok(SpectraTable {
            mapping: mapping.clone(),
            size: self.field.size(),
            length: config.length,
            bounds: Bounds::Spectrum {
                qmin: config.qmin,
                qmax: config.qmax,
            },
            rows,
        })
    }

    /// Parity with the fewest pairs at `config.quad` among `parities`.
    ///
    /// # Errors
    ///
    /// [`Error::CodeLength`] for an invalid codelength,
    /// [`Error::ParityLength`] if a parity does not have `config.length`
    /// coefficients, and the errors of [`Neighborhood::new`].
    pub fn sieve<I>(
        &self,
        mapping: &Mapping,
        config: &SieveConfig,
        parities: I,
    ) -> Result<MappingReport<u64>>
    where
        I: IntoIterator<Item = Parity>,
    {
        config.validate(&self.field)?;
        let parities: Vec<Parity> = parities.into_iter().collect();
        if let Some(h) = parities.iter().find(|h| h.len() != config.length) {
            return Err(Error::ParityLength {
                expected: config.length,
                found: h.len(),
            });
        }
        let neighbors = self.neighborhood(mapping, config.length)?;
        let mut strategy = SieveStrategy::new(&self.field, &neighbors, config.length, config.quad);
        info!(
            quad = config.quad,
            largest_part = strategy.largest_part(),
            parities = parities.len(),
            "sieve ready"
        );

        let outcome = search(&mut strategy, &self.field, parities);
        info!(
            evaluated = outcome.evaluated,
            abandoned = outcome.abandoned,
            champions = outcome.champions.len(),
            "mapping done"
        );
        Ok(MappingReport {
            mapping: mapping.clone(),
            size: self.field.size(),
            length: config.length,
            bounds: Bounds::Sieve { quad: config.quad },
            champions: outcome.champions,
            evaluated: outcome.evaluated,
            abandoned: outcome.abandoned,
        })
    }
}
