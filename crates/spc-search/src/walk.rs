//! Pruned enumeration of the near neighbors of one codeword.
//!
//! A neighbor of `x` is chosen by giving every free coordinate a neighbor
//! rank: `y[i] = V[x[i]][rank[i]]`, where `V[a]` lists the field elements by
//! increasing quadrance from `a`. The last coordinate follows from the
//! parity check, and the pair quadrance is
//!
//! ```text
//! Σ_{i < n-1} Q[x[i]][y[i]]  +  Q[x[n-1]][y[n-1]]
//! ```
//!
//! The walk groups rank tuples by their support `T` (the coordinates with
//! a non-zero rank) and visits supports by increasing weight `w = |T|`:
//!
//! - A weight is skipped along with every larger one once even the closest
//!   possible pair, `max(w, 2)` minimum quadrances, reaches `qmax`.
//! - A support is skipped if some coordinate's rank 1 is already cut, or if
//!   the rank-1 quadrances alone reach `qmax`.
//! - Inside a support every rank runs from 1 to just below its per-weight
//!   cap (see [`Cutoffs`]). The box of ranks is swept as a reflected
//!   mixed-radix Gray code driven by focus pointers, so every step moves
//!   exactly one rank by one and costs O(1): the partial sum and the
//!   implied last coordinate are patched rather than recomputed.
//!
//! Every rank tuple is visited at most once, and every tuple whose pair
//! quadrance is below `qmax` is visited. Totals are exact; tuples the
//! bounds could not exclude are still handed to the visitor, which
//! discards those at or above `qmax`.

use crate::combination::Combinations;
use crate::error::{Error, Result};
use crate::field::{Elt, Field};
use crate::neighbors::{Cutoffs, Neighborhood};
use crate::parity::Parity;
use crate::spectrum::Spectrum;

/// Tables and scratch buffers for walking neighbors of many codewords.
///
/// Buffers are sized once for a codelength and reused for every codeword
/// and parity of the same mapping.
#[derive(Debug, Clone)]
pub struct NeighborWalk<'a> {
    field: &'a Field,
    neighbors: &'a Neighborhood,
    cutoffs: &'a Cutoffs,
    length: usize,
    /// Coordinates of the current support.
    support: Vec<usize>,
    /// Rank caps of the support slots at the current weight.
    caps: Vec<usize>,
    /// Current rank of each support slot.
    rank: Vec<usize>,
    /// Support slots whose rank range has at least two values.
    moving: Vec<usize>,
    /// Sweep direction of each moving slot.
    rising: Vec<bool>,
    /// Focus pointers, one more than the moving slots.
    focus: Vec<usize>,
}

impl<'a> NeighborWalk<'a> {
    /// Prepares a walk over codewords of length `length`.
    ///
    /// # Errors
    ///
    /// [`Error::CodeLength`] if `length < 2`, [`Error::CutoffsMismatch`]
    /// unless `cutoffs` were built over `neighbors`' field size for at
    /// least `length` coordinates.
    pub fn new(
        field: &'a Field,
        neighbors: &'a Neighborhood,
        cutoffs: &'a Cutoffs,
        length: usize,
    ) -> Result<Self> {
        let size = neighbors.size();
        if length < 2 {
            return Err(Error::CodeLength { length, size });
        }
        let covered_length = cutoffs.max_weight() + 1;
        if length > covered_length || cutoffs.size() != size {
            return Err(Error::CutoffsMismatch {
                length,
                size,
                covered_length,
                covered_size: cutoffs.size(),
            });
        }
        let free = length - 1;
        Ok(Self {
            field,
            neighbors,
            cutoffs,
            length,
            support: vec![0; free],
            caps: vec![0; free],
            rank: vec![0; free],
            moving: vec![0; free],
            rising: vec![true; free],
            focus: vec![0; free + 1],
        })
    }

    /// Codelength the buffers were sized for.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive bound on the pair quadrances the cutoffs keep.
    #[inline]
    pub fn qmax(&self) -> u32 {
        self.cutoffs.qmax()
    }

    /// Adds every pair `(word, y)` below `qmax` to `spectrum`.
    ///
    /// Returns the number of rank tuples visited, including those the
    /// bounds let through but whose exact quadrance is out of range.
    pub fn accumulate(&mut self, parity: &Parity, word: &[Elt], spectrum: &mut Spectrum) -> u64 {
        let mut visited = 0u64;
        self.run(parity, word, |_, _, quadrance| {
            visited += 1;
            spectrum.record(quadrance);
        });
        visited
    }

    /// Visits the candidate neighbors of `word`.
    ///
    /// `visit` receives the support (increasing coordinates), the rank of
    /// each support coordinate and the exact pair quadrance. The first
    /// call is always `word` itself: empty support, quadrance 0.
    ///
    /// `word` and `parity` must both have the walk's length.
    pub fn run<F>(&mut self, parity: &Parity, word: &[Elt], mut visit: F)
    where
        F: FnMut(&[usize], &[usize], u64),
    {
        let n = word.len();
        debug_assert_eq!(n, self.length);
        debug_assert_eq!(parity.len(), n);

        let Self {
            field,
            neighbors,
            cutoffs,
            support,
            caps,
            rank,
            moving,
            rising,
            focus,
            ..
        } = self;
        let (field, neighbors, cutoffs) = (*field, *neighbors, *cutoffs);

        visit(&[], &[], 0);

        let free = n - 1;
        let h = parity.exponents();
        let x_last = word[free];
        let qmax = u64::from(cutoffs.qmax());
        let cq = u64::from(neighbors.min_quadrance());
        let subsets = Combinations::new(free);

        for w in 1..=free {
            if cq > 0 && (w.max(2) as u64).saturating_mul(cq) >= qmax {
                break;
            }
            let support = &mut support[..w];
            if !subsets.first(support) {
                break;
            }
            loop {
                // Lowest reachable total for this support: rank 1 everywhere,
                // plus the forced move of the last coordinate when w = 1.
                let mut floor = if w == 1 { cq } else { 0 };
                let mut open = true;
                for (s, &i) in support.iter().enumerate() {
                    let cap = cutoffs.cap(w, word[i]);
                    if cap < 2 {
                        open = false;
                        break;
                    }
                    caps[s] = cap;
                    floor += u64::from(neighbors.ranked_quadrance(word[i], 1));
                }

                if open && floor < qmax {
                    let mut partial = 0u64;
                    let mut last = x_last;
                    let mut m = 0;
                    for (s, &i) in support.iter().enumerate() {
                        let y = neighbors.neighbor(word[i], 1);
                        rank[s] = 1;
                        partial += u64::from(neighbors.quadrance(word[i], y));
                        field.mul_acc(&mut last, h[i], word[i] ^ y);
                        if caps[s] >= 3 {
                            moving[m] = s;
                            rising[m] = true;
                            m += 1;
                        }
                    }
                    for (j, f) in focus[..=m].iter_mut().enumerate() {
                        *f = j;
                    }

                    loop {
                        let total = partial + u64::from(neighbors.quadrance(x_last, last));
                        visit(&*support, &rank[..w], total);

                        let j = focus[0];
                        focus[0] = 0;
                        if j == m {
                            break;
                        }
                        let s = moving[j];
                        let i = support[s];
                        let old = neighbors.neighbor(word[i], rank[s]);
                        if rising[j] {
                            rank[s] += 1;
                        } else {
                            rank[s] -= 1;
                        }
                        let new = neighbors.neighbor(word[i], rank[s]);
                        partial = partial - u64::from(neighbors.quadrance(word[i], old))
                            + u64::from(neighbors.quadrance(word[i], new));
                        field.mul_acc(&mut last, h[i], old ^ new);

                        if rank[s] == 1 || rank[s] == caps[s] - 1 {
                            rising[j] = !rising[j];
                            focus[j] = focus[j + 1];
                            focus[j + 1] = j + 1;
                        }
                    }
                }

                if !subsets.advance(support) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::{Constellation, Mapping, Point};
    use crate::coset::Coset;
    use crate::parity::CanonicalParities;
    use std::collections::HashSet;

    fn grid(q: usize) -> Constellation {
        let mut side = 1;
        while side * side < q {
            side *= 2;
        }
        let pts = (0..q)
            .map(|i| Point::new(2 * (i % side) as i32 - side as i32 + 1, 2 * (i / side) as i32))
            .collect();
        Constellation::new(pts).unwrap()
    }

    /// Deterministic shuffle so the tests exercise uneven rankings.
    fn scrambled(q: usize, seed: u64) -> Mapping {
        let mut v: Vec<usize> = (0..q).collect();
        let mut s = seed;
        for i in (1..q).rev() {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            v.swap(i, (s >> 33) as usize % (i + 1));
        }
        Mapping::new(v, q).unwrap()
    }

    /// Every rank tuple, no pruning.
    fn brute(field: &Field, nb: &Neighborhood, h: &Parity, word: &[Elt], qmax: u32) -> Spectrum {
        let n = word.len();
        let q = field.size();
        let mut spectrum = Spectrum::new(qmax);
        let mut ranks = vec![0usize; n - 1];
        loop {
            let mut total = 0u64;
            let mut last = 0;
            for i in 0..n - 1 {
                let y = nb.neighbor(word[i], ranks[i]);
                total += u64::from(nb.quadrance(word[i], y));
                field.mul_acc(&mut last, h.exponents()[i], y);
            }
            total += u64::from(nb.quadrance(word[n - 1], last));
            spectrum.record(total);

            let Some(i) = ranks.iter().position(|&r| r + 1 < q) else {
                return spectrum;
            };
            ranks[i] += 1;
            ranks[..i].fill(0);
        }
    }

    fn check(m: u32, n: usize, mapping: &Mapping, qmaxes: &[u32], parities: usize) {
        let field = Field::with_degree(m).unwrap();
        let nb = Neighborhood::new(&grid(field.size()), mapping).unwrap();
        for &qmax in qmaxes {
            let cut = Cutoffs::new(&nb, n, qmax);
            let mut walk = NeighborWalk::new(&field, &nb, &cut, n).unwrap();
            for h in CanonicalParities::new(&field, n).take(parities) {
                for word in Coset::new(&field, &h).iter() {
                    let expected = brute(&field, &nb, &h, &word, qmax);

                    let mut got = Spectrum::new(qmax);
                    let mut seen = HashSet::new();
                    walk.run(&h, &word, |support, ranks, total| {
                        let mut full = vec![0; n - 1];
                        for (&i, &r) in support.iter().zip(ranks) {
                            assert!(r >= 1);
                            full[i] = r;
                        }
                        assert!(seen.insert(full), "rank tuple visited twice");
                        got.record(total);
                    });
                    assert_eq!(got, expected, "m={m} n={n} qmax={qmax} h={h:?} x={word:?}");
                }
            }
        }
    }

    #[test]
    fn gf4_matches_brute_force() {
        for seed in 0..4 {
            check(2, 3, &scrambled(4, seed), &[0, 1, 5, 9, 13, 17, 20, 25, 40], usize::MAX);
        }
        check(2, 2, &Mapping::identity(4), &[0, 4, 9, 30], usize::MAX);
    }

    #[test]
    fn gf8_matches_brute_force() {
        for seed in 0..2 {
            check(3, 3, &scrambled(8, seed), &[0, 5, 9, 17, 30], usize::MAX);
        }
        check(3, 4, &scrambled(8, 7), &[13, 30], 3);
    }

    #[test]
    fn coincident_points_are_not_pruned() {
        let field = Field::with_degree(2).unwrap();
        let c = Constellation::new(vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(0, 2),
        ])
        .unwrap();
        let nb = Neighborhood::new(&c, &Mapping::identity(4)).unwrap();
        assert_eq!(nb.min_quadrance(), 0);
        let cut = Cutoffs::new(&nb, 3, 10);
        let mut walk = NeighborWalk::new(&field, &nb, &cut, 3).unwrap();
        for h in CanonicalParities::new(&field, 3) {
            let mut got = Spectrum::new(10);
            let mut expected = vec![0u64; 10];
            for word in Coset::new(&field, &h).iter() {
                walk.accumulate(&h, &word, &mut got);
                let b = brute(&field, &nb, &h, &word, 10);
                for (e, c) in expected.iter_mut().zip(b.counts()) {
                    *e += c;
                }
            }
            assert_eq!(got.counts(), expected.as_slice());
        }
    }

    #[test]
    fn first_visit_is_the_word_itself() {
        let field = Field::with_degree(2).unwrap();
        let nb = Neighborhood::new(&grid(4), &Mapping::identity(4)).unwrap();
        let cut = Cutoffs::new(&nb, 3, 0);
        let mut walk = NeighborWalk::new(&field, &nb, &cut, 3).unwrap();
        let h = Parity::new(vec![1, 1, 0], &field).unwrap();
        let mut calls = Vec::new();
        walk.run(&h, &[0, 0, 0], |s, r, t| calls.push((s.to_vec(), r.to_vec(), t)));
        // qmax = 0 with a positive minimum quadrance stops before weight 1.
        assert_eq!(calls, vec![(vec![], vec![], 0)]);

        let mut s = Spectrum::new(0);
        assert_eq!(walk.accumulate(&h, &[0, 0, 0], &mut s), 1);
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn cutoffs_must_cover_the_walk() {
        let field = Field::with_degree(2).unwrap();
        let nb = Neighborhood::new(&grid(4), &Mapping::identity(4)).unwrap();
        let short = Cutoffs::new(&nb, 2, 20);
        assert!(matches!(
            NeighborWalk::new(&field, &nb, &short, 3),
            Err(Error::CutoffsMismatch {
                length: 3,
                covered_length: 2,
                ..
            })
        ));
        assert!(NeighborWalk::new(&field, &nb, &short, 2).is_ok());
        assert!(matches!(
            NeighborWalk::new(&field, &nb, &short, 1),
            Err(Error::CodeLength { length: 1, size: 4 })
        ));

        // Cutoffs over GF(8) tables handed a GF(4) neighborhood.
        let big = Neighborhood::new(&grid(8), &Mapping::identity(8)).unwrap();
        let wide = Cutoffs::new(&big, 3, 20);
        assert!(matches!(
            NeighborWalk::new(&field, &nb, &wide, 3),
            Err(Error::CutoffsMismatch {
                size: 4,
                covered_size: 8,
                ..
            })
        ));
    }

    #[test]
    fn walk_reports_the_cutoff_bound() {
        let field = Field::with_degree(2).unwrap();
        let nb = Neighborhood::new(&grid(4), &Mapping::identity(4)).unwrap();
        let cut = Cutoffs::new(&nb, 3, 17);
        let walk = NeighborWalk::new(&field, &nb, &cut, 3).unwrap();
        assert_eq!(walk.qmax(), 17);
        assert_eq!(walk.length(), 3);
    }
}
