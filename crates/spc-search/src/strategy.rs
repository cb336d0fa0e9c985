//! Scoring strategies and the branch-and-bound driver shared by them.
//!
//! A [`Strategy`] scores one parity at a time against the best score seen
//! so far and may give up on a parity as soon as it is certain to lose.
//! [`search`] feeds it canonical parities and keeps the champions.
//!
//! Two strategies exist:
//!
//! - [`SpectrumStrategy`]: full distance spectrum via the pruned neighbor
//!   walk.
//! - [`SieveStrategy`](crate::sieve::SieveStrategy): multiplicity of one
//!   quadrance via partitions of that quadrance.

use core::cmp::Ordering;
use core::fmt;

use tracing::{debug, info};

use crate::coset::Coset;
use crate::field::{Elt, Field};
use crate::parity::Parity;
use crate::report::Champion;
use crate::spectrum::SpectrumScore;
use crate::walk::NeighborWalk;

/// Outcome of scoring one parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every codeword was scored.
    Complete,
    /// The partial score already lost to the best one; scoring stopped.
    Abandoned,
}

/// A way to score parities.
pub trait Strategy {
    /// Score of one parity.
    type Score: Clone + fmt::Debug + fmt::Display;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// [`Ordering::Less`] when `a` is better than `b`.
    fn compare(&self, a: &Self::Score, b: &Self::Score) -> Ordering;

    /// Scores `parity`, stopping early if the running score compares
    /// strictly worse than `best`.
    ///
    /// Scores only grow worse as codewords are added, so an abandoned
    /// parity could never have beaten `best`.
    fn evaluate(&mut self, parity: &Parity, best: Option<&Self::Score>) -> Verdict;

    /// Score left by the last [`evaluate`](Self::evaluate) call; partial if
    /// it was abandoned.
    fn score(&self) -> &Self::Score;
}

/// Champions of one search plus counters.
#[derive(Debug, Clone)]
pub struct Outcome<S> {
    /// Successive champions; the last is the best.
    pub champions: Vec<Champion<S>>,
    /// Parities scored.
    pub evaluated: u64,
    /// Parities abandoned early.
    pub abandoned: u64,
}

/// Scores every parity in `parities` and keeps each one that compares
/// better than or equal to the best so far.
///
/// Ties replace the previous champion, so among equally good parities the
/// last one enumerated wins.
pub fn search<S, I>(strategy: &mut S, field: &Field, parities: I) -> Outcome<S::Score>
where
    S: Strategy,
    I: IntoIterator<Item = Parity>,
{
    let mut best: Option<S::Score> = None;
    let mut outcome = Outcome {
        champions: Vec::new(),
        evaluated: 0,
        abandoned: 0,
    };

    for parity in parities {
        let verdict = strategy.evaluate(&parity, best.as_ref());
        outcome.evaluated += 1;
        debug!(
            strategy = strategy.name(),
            parity = ?parity.exponents(),
            ?verdict,
            "parity scored"
        );
        if verdict == Verdict::Abandoned {
            outcome.abandoned += 1;
            continue;
        }

        let score = strategy.score();
        let wins = best
            .as_ref()
            .map_or(true, |b| strategy.compare(score, b) != Ordering::Greater);
        if wins {
            info!(
                strategy = strategy.name(),
                parity = ?parity.exponents(),
                %score,
                "new champion"
            );
            best = Some(score.clone());
            outcome
                .champions
                .push(Champion::new(field, parity, score.clone()));
        }
    }
    outcome
}

// ============================================================================
// Spectrum strategy
// ============================================================================

/// Scores a parity by its full distance spectrum.
#[derive(Debug, Clone)]
pub struct SpectrumStrategy<'a> {
    field: &'a Field,
    walk: NeighborWalk<'a>,
    current: SpectrumScore,
    word: Vec<Elt>,
    early_abort: bool,
    visited: u64,
}

impl<'a> SpectrumStrategy<'a> {
    /// Spectrum strategy over a prepared walk.
    ///
    /// Spectra cover `qmin..qmax` where `qmax` is the walk's cutoff bound.
    pub fn new(field: &'a Field, walk: NeighborWalk<'a>, qmin: u32, early_abort: bool) -> Self {
        let length = walk.length();
        Self {
            field,
            current: SpectrumScore::new(qmin, walk.qmax()),
            walk,
            word: vec![0; length],
            early_abort,
            visited: 0,
        }
    }
}

impl Strategy for SpectrumStrategy<'_> {
    type Score = SpectrumScore;

    fn name(&self) -> &'static str {
        "spectrum"
    }

    fn compare(&self, a: &SpectrumScore, b: &SpectrumScore) -> Ordering {
        a.compare(b)
    }

    fn evaluate(&mut self, parity: &Parity, best: Option<&SpectrumScore>) -> Verdict {
        self.current.spectrum.reset();
        self.visited = 0;
        let coset = Coset::new(self.field, parity);
        coset.first(&mut self.word);
        loop {
            self.visited += self
                .walk
                .accumulate(parity, &self.word, &mut self.current.spectrum);
            if self.early_abort {
                if let Some(best) = best {
                    if self.current.compare(best) == Ordering::Greater {
                        return Verdict::Abandoned;
                    }
                }
            }
            if !coset.advance(&mut self.word) {
                debug!(
                    pairs = self.current.spectrum.total(),
                    visited = self.visited,
                    "coset walked"
                );
                return Verdict::Complete;
            }
        }
    }

    fn score(&self) -> &SpectrumScore {
        &self.current
    }
}
