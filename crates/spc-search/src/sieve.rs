//! Partition sieve: the multiplicity of a single quadrance.
//!
//! Instead of walking neighbors by rank, the sieve fixes a target
//! quadrance `quad` and splits it over the coordinates in every possible
//! way. For one split `d[0..n]` and one codeword `x`, the candidates are
//! the tuples with `y[i]` on the circle of radius `d[i]` around `x[i]` for
//! every free coordinate; the parity check fixes `y[n-1]`, and the pair
//! counts when `Q[x[n-1]][y[n-1]] = d[n-1]`.
//!
//! Each pair at quadrance `quad` has exactly one split, so the
//! multiplicity equals the spectrum count at `quad`.
//!
//! Splits are streamed, never collected. No part can exceed the largest
//! point quadrance, and a partition with a part that no pair of points
//! realizes is skipped with all of its arrangements.

use core::cmp::Ordering;

use tracing::debug;

use crate::coset::Coset;
use crate::field::{Elt, Field};
use crate::neighbors::Neighborhood;
use crate::parity::Parity;
use crate::partition::Compositions;
use crate::strategy::{Strategy, Verdict};

/// Scores a parity by how many pairs sit at exactly one quadrance.
#[derive(Debug, Clone)]
pub struct SieveStrategy<'a> {
    field: &'a Field,
    neighbors: &'a Neighborhood,
    compositions: Compositions,
    largest: u32,
    /// Distinct point quadrances up to `largest`, sorted.
    realized: Vec<u32>,
    partition: Vec<u32>,
    split: Vec<u32>,
    word: Vec<Elt>,
    /// Per free coordinate: first rank on its circle and the circle size.
    spans: Vec<(usize, usize)>,
    index: Vec<usize>,
    multiplicity: u64,
    splits: u64,
}

impl<'a> SieveStrategy<'a> {
    /// Sieve for quadrance `quad` over codewords of length `length`.
    pub fn new(field: &'a Field, neighbors: &'a Neighborhood, length: usize, quad: u32) -> Self {
        let largest = quad.min(neighbors.max_quadrance());
        let mut realized: Vec<u32> = (0..neighbors.size())
            .flat_map(|a| neighbors.quadrances(a as Elt).iter().copied())
            .filter(|&d| d <= largest)
            .collect();
        realized.sort_unstable();
        realized.dedup();
        let free = length.saturating_sub(1);
        Self {
            field,
            neighbors,
            compositions: Compositions::new(quad, largest),
            largest,
            realized,
            partition: vec![0; length],
            split: vec![0; length],
            word: vec![0; length],
            spans: vec![(0, 0); free],
            index: vec![0; free],
            multiplicity: 0,
            splits: 0,
        }
    }

    /// Largest single-coordinate quadrance a split may use.
    #[inline]
    pub fn largest_part(&self) -> u32 {
        self.largest
    }

    /// Splits with every part realized, scored by the last evaluation.
    #[cfg(test)]
    fn splits(&self) -> u64 {
        self.splits
    }
}

impl Strategy for SieveStrategy<'_> {
    type Score = u64;

    fn name(&self) -> &'static str {
        "sieve"
    }

    fn compare(&self, a: &u64, b: &u64) -> Ordering {
        a.cmp(b)
    }

    fn evaluate(&mut self, parity: &Parity, best: Option<&u64>) -> Verdict {
        let Self {
            field,
            neighbors,
            compositions,
            realized,
            partition,
            split,
            word,
            spans,
            index,
            multiplicity,
            splits,
            ..
        } = self;
        let (field, neighbors) = (*field, *neighbors);
        *multiplicity = 0;
        *splits = 0;

        let n = word.len();
        let free = n - 1;
        let h = parity.exponents();
        let coset = Coset::new(field, parity);

        let mut more = compositions.first(partition, split);
        while more {
            if !split.iter().all(|d| realized.binary_search(d).is_ok()) {
                more = compositions.skip(partition, split);
                continue;
            }
            *splits += 1;

            coset.first(word);
            loop {
                let mut empty = false;
                for i in 0..free {
                    let ranks = neighbors.circle_ranks(word[i], split[i]);
                    if ranks.is_empty() {
                        empty = true;
                        break;
                    }
                    spans[i] = (ranks.start, ranks.len());
                }

                if !empty {
                    let x_last = word[free];
                    index.fill(0);
                    loop {
                        let mut last = 0;
                        for i in 0..free {
                            let (start, _) = spans[i];
                            let y = neighbors.neighbor(word[i], start + index[i]);
                            field.mul_acc(&mut last, h[i], y);
                        }
                        if neighbors.quadrance(x_last, last) == split[free] {
                            *multiplicity += 1;
                            if best.is_some_and(|&b| *multiplicity > b) {
                                return Verdict::Abandoned;
                            }
                        }

                        let mut i = 0;
                        while i < free {
                            index[i] += 1;
                            if index[i] < spans[i].1 {
                                break;
                            }
                            index[i] = 0;
                            i += 1;
                        }
                        if i == free {
                            break;
                        }
                    }
                }

                if !coset.advance(word) {
                    break;
                }
            }
            more = compositions.advance(partition, split);
        }
        debug!(splits = *splits, multiplicity = *multiplicity, "splits walked");
        Verdict::Complete
    }

    fn score(&self) -> &u64 {
        &self.multiplicity
    }
}
