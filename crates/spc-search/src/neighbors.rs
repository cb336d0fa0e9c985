//! Quadrance matrix and distance-ranked neighbor lists for one mapping.
//!
//! Everything here is rebuilt together whenever the mapping changes, so the
//! quadrances, the rankings and the cutoffs derived from them always agree.

use core::ops::Range;

use crate::constellation::{Constellation, Mapping};
use crate::error::{Error, Result};
use crate::field::Elt;
use crate::table::Table;

/// Pairwise quadrances between mapped field elements and, per element, all
/// elements sorted by increasing quadrance.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    quad: Table<u32>,
    rank: Table<Elt>,
    min_quadrance: u32,
    max_quadrance: u32,
}

impl Neighborhood {
    /// Builds the tables for `mapping` over `constellation`.
    ///
    /// Ties in quadrance are broken so that an element is always its own
    /// rank-0 neighbor, then by element value.
    ///
    /// # Errors
    ///
    /// [`Error::MappingLength`] if the mapping and the constellation differ
    /// in size, [`Error::MappingOutOfRange`] if the mapping points past the
    /// constellation, [`Error::QuadranceOverflow`] if two points are too far
    /// apart for `u32`.
    pub fn new(constellation: &Constellation, mapping: &Mapping) -> Result<Self> {
        let q = constellation.len();
        if mapping.len() != q {
            return Err(Error::MappingLength {
                expected: q,
                found: mapping.len(),
            });
        }
        if let Some(&value) = mapping.as_slice().iter().find(|&&p| p >= q) {
            return Err(Error::MappingOutOfRange { value, size: q });
        }

        let mut quad = Table::filled(q, q, 0u32);
        for i in 0..q {
            let pi = constellation.point(mapping.point_of(i as Elt));
            for j in i + 1..q {
                let pj = constellation.point(mapping.point_of(j as Elt));
                let d = pi
                    .quadrance(pj)
                    .ok_or(Error::QuadranceOverflow { a: i, b: j })?;
                quad[(i, j)] = d;
                quad[(j, i)] = d;
            }
        }

        let mut rank = Table::from_fn(q, q, |_, j| j as Elt);
        for i in 0..q {
            let row = quad.row(i);
            rank.row_mut(i)
                .sort_by_key(|&j| (row[j as usize], j as usize != i, j));
        }

        let min_quadrance = (0..q)
            .flat_map(|i| (0..q).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| quad[(i, j)])
            .min()
            .unwrap_or(0);
        let max_quadrance = (0..q)
            .map(|i| quad.row(i).iter().copied().max().unwrap_or(0))
            .max()
            .unwrap_or(0);

        Ok(Self {
            quad,
            rank,
            min_quadrance,
            max_quadrance,
        })
    }

    /// Field size `q`.
    #[inline]
    pub fn size(&self) -> usize {
        self.quad.rows()
    }

    /// Quadrance between the points carrying `a` and `b`.
    #[inline]
    pub fn quadrance(&self, a: Elt, b: Elt) -> u32 {
        self.quad[(a as usize, b as usize)]
    }

    /// The `r`-th closest element to `a` (`r = 0` is `a` itself).
    #[inline]
    pub fn neighbor(&self, a: Elt, r: usize) -> Elt {
        self.rank[(a as usize, r)]
    }

    /// Quadrance from `a` to its `r`-th closest element.
    #[inline]
    pub fn ranked_quadrance(&self, a: Elt, r: usize) -> u32 {
        self.quadrance(a, self.neighbor(a, r))
    }

    /// Quadrance row of `a`.
    #[inline]
    pub fn quadrances(&self, a: Elt) -> &[u32] {
        self.quad.row(a as usize)
    }

    /// Neighbors of `a` in increasing quadrance.
    #[inline]
    pub fn ranking(&self, a: Elt) -> &[Elt] {
        self.rank.row(a as usize)
    }

    /// Ranks of the elements at exactly quadrance `r` from `a`, possibly
    /// an empty range.
    pub fn circle_ranks(&self, a: Elt, r: u32) -> Range<usize> {
        let row = self.quadrances(a);
        let ranking = self.ranking(a);
        let lo = ranking.partition_point(|&e| row[e as usize] < r);
        let hi = ranking.partition_point(|&e| row[e as usize] <= r);
        lo..hi
    }

    /// Smallest quadrance between two distinct field elements.
    ///
    /// Zero when two elements are mapped onto coincident points.
    #[inline]
    pub fn min_quadrance(&self) -> u32 {
        self.min_quadrance
    }

    /// Largest quadrance between any two elements.
    #[inline]
    pub fn max_quadrance(&self) -> u32 {
        self.max_quadrance
    }
}

/// Per-weight rank cutoffs.
///
/// `cap(w, j)` is the first rank `d >= 1` at which the neighbor of `j`
/// lies at quadrance `>= qmax - max(1, w - 1) · min_quadrance`, or `q` if
/// no rank does. With `w >= 2` free coordinates moving, the other `w - 1`
/// each add at least the minimum quadrance; with a single one moving, the
/// last coordinate is forced to move as well. Either way no rank at or
/// beyond the cap can take part in a pair below `qmax`.
#[derive(Debug, Clone)]
pub struct Cutoffs {
    caps: Table<usize>,
    qmax: u32,
}

impl Cutoffs {
    /// Cutoffs for weights `1..length` against `qmax`.
    pub fn new(neighbors: &Neighborhood, length: usize, qmax: u32) -> Self {
        let q = neighbors.size();
        let cq = neighbors.min_quadrance();
        let mut caps = Table::filled(length.max(1), q, q);
        for w in 1..length {
            let others = (w.saturating_sub(1)).max(1) as u32;
            let budget = qmax.saturating_sub(others.saturating_mul(cq));
            for j in 0..q {
                caps[(w, j)] = (1..q)
                    .find(|&d| neighbors.ranked_quadrance(j as Elt, d) >= budget)
                    .unwrap_or(q);
            }
        }
        Self { caps, qmax }
    }

    /// Rank cap for element `j` when `w` coordinates move.
    #[inline]
    pub fn cap(&self, w: usize, j: Elt) -> usize {
        self.caps[(w, j as usize)]
    }

    /// Bound the cutoffs were built for.
    #[inline]
    pub fn qmax(&self) -> u32 {
        self.qmax
    }

    /// Number of field elements each row covers.
    #[inline]
    pub fn size(&self) -> usize {
        self.caps.cols()
    }

    /// Largest weight with a cutoff row.
    #[inline]
    pub fn max_weight(&self) -> usize {
        self.caps.rows() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::Point;

    fn square() -> Constellation {
        Constellation::new(vec![
            Point::new(-1, -1),
            Point::new(1, -1),
            Point::new(-1, 1),
            Point::new(1, 1),
        ])
        .unwrap()
    }

    #[test]
    fn square_quadrances() {
        let nb = Neighborhood::new(&square(), &Mapping::identity(4)).unwrap();
        assert_eq!(nb.quadrances(0), &[0, 4, 4, 8]);
        assert_eq!(nb.quadrances(3), &[8, 4, 4, 0]);
        assert_eq!(nb.min_quadrance(), 4);
        assert_eq!(nb.max_quadrance(), 8);
        assert_eq!(nb.ranking(0), &[0, 1, 2, 3]);
        assert_eq!(nb.ranking(3), &[3, 1, 2, 0]);
        assert_eq!(nb.ranked_quadrance(1, 3), 8);
    }

    fn circle(nb: &Neighborhood, a: Elt, r: u32) -> &[Elt] {
        &nb.ranking(a)[nb.circle_ranks(a, r)]
    }

    #[test]
    fn circles_partition_the_field() {
        let nb = Neighborhood::new(&square(), &Mapping::identity(4)).unwrap();
        assert_eq!(circle(&nb, 0, 0), &[0]);
        assert_eq!(circle(&nb, 0, 4), &[1, 2]);
        assert_eq!(circle(&nb, 0, 8), &[3]);
        assert!(circle(&nb, 0, 5).is_empty());
        assert!(circle(&nb, 3, 100).is_empty());
        assert_eq!(nb.circle_ranks(0, 4), 1..3);
        let total: usize = [0, 4, 8].iter().map(|&r| circle(&nb, 2, r).len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn rankings_follow_the_mapping() {
        let map = Mapping::new(vec![3, 2, 1, 0], 4).unwrap();
        let nb = Neighborhood::new(&square(), &map).unwrap();
        // Element 0 sits on point 3, farthest from element 3 on point 0.
        assert_eq!(nb.quadrance(0, 3), 8);
        assert_eq!(nb.ranking(0), &[0, 1, 2, 3]);
        for a in 0..4 {
            let r = nb.ranking(a);
            assert_eq!(r[0], a);
            assert!(r.windows(2).all(|w| nb.quadrance(a, w[0]) <= nb.quadrance(a, w[1])));
        }
    }

    #[test]
    fn own_rank_wins_ties_at_zero() {
        let c = Constellation::new(vec![Point::new(0, 0); 4]).unwrap();
        let nb = Neighborhood::new(&c, &Mapping::identity(4)).unwrap();
        assert_eq!(nb.min_quadrance(), 0);
        assert_eq!(nb.max_quadrance(), 0);
        assert_eq!(nb.ranking(2), &[2, 0, 1, 3]);
    }

    #[test]
    fn mismatched_mapping() {
        let map = Mapping::identity(8);
        assert!(matches!(
            Neighborhood::new(&square(), &map),
            Err(Error::MappingLength { expected: 4, found: 8 })
        ));
    }

    #[test]
    fn overflowing_constellation() {
        let c = Constellation::new(vec![Point::new(i32::MIN, 0), Point::new(i32::MAX, 0)]).unwrap();
        assert!(matches!(
            Neighborhood::new(&c, &Mapping::identity(2)),
            Err(Error::QuadranceOverflow { a: 0, b: 1 })
        ));
    }

    #[test]
    fn cutoffs_on_the_square() {
        let nb = Neighborhood::new(&square(), &Mapping::identity(4)).unwrap();
        // Budget for w = 1, 2 is 20 - 4 = 16: nothing reaches it.
        let cut = Cutoffs::new(&nb, 3, 20);
        assert_eq!(cut.max_weight(), 2);
        assert_eq!(cut.size(), 4);
        assert_eq!(cut.cap(1, 0), 4);
        assert_eq!(cut.cap(2, 3), 4);
        // Budget 12 - 4 = 8: rank 3 (quadrance 8) is cut.
        let cut = Cutoffs::new(&nb, 3, 12);
        assert_eq!(cut.cap(1, 0), 3);
        // Budget 0: every rank is cut.
        let cut = Cutoffs::new(&nb, 3, 4);
        assert_eq!(cut.cap(1, 2), 1);
        assert_eq!(cut.qmax(), 4);
    }
}
