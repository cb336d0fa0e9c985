//! Signal constellations and field-to-point mappings.

use crate::error::{Error, Result};
use crate::field::{Elt, MAX_DEGREE};

/// A point of the signal plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    /// In-phase coordinate.
    pub x: i32,
    /// Quadrature coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, or `None` if it does not fit in `u32`.
    pub fn quadrance(self, other: Self) -> Option<u32> {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        let q = dx.checked_mul(dx)?.checked_add(dy.checked_mul(dy)?)?;
        u32::try_from(q).ok()
    }
}

/// An ordered set of `2^m` points, `1 <= m <= 10`.
///
/// Points may repeat; a repeated point simply yields quadrance 0 between
/// two distinct field elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constellation {
    points: Vec<Point>,
    degree: u32,
}

impl Constellation {
    /// Wraps a point list.
    ///
    /// # Errors
    ///
    /// [`Error::ConstellationSize`] unless the count is a power of two
    /// between 2 and `2^10`.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let count = points.len();
        if !count.is_power_of_two() || count < 2 || count > 1 << MAX_DEGREE {
            return Err(Error::ConstellationSize { count });
        }
        Ok(Self {
            degree: count.trailing_zeros(),
            points,
        })
    }

    /// Number of points `q`.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false once constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `m` such that the constellation has `2^m` points.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// The points in index order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point at index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        self.points[i]
    }
}

/// Assignment of constellation points to field elements.
///
/// Entry `i` is the index of the point that carries field element `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mapping {
    points: Vec<usize>,
}

impl Mapping {
    /// Validates a mapping for a field of `size` elements.
    ///
    /// # Errors
    ///
    /// [`Error::MappingLength`] if there are not exactly `size` entries,
    /// [`Error::MappingOutOfRange`] for an entry `>= size`,
    /// [`Error::MappingRepeated`] if two elements share a point.
    pub fn new(points: Vec<usize>, size: usize) -> Result<Self> {
        if points.len() != size {
            return Err(Error::MappingLength {
                expected: size,
                found: points.len(),
            });
        }
        let mut seen = vec![false; size];
        for &value in &points {
            if value >= size {
                return Err(Error::MappingOutOfRange { value, size });
            }
            if std::mem::replace(&mut seen[value], true) {
                return Err(Error::MappingRepeated { value });
            }
        }
        Ok(Self { points })
    }

    /// The identity assignment.
    pub fn identity(size: usize) -> Self {
        Self {
            points: (0..size).collect(),
        }
    }

    /// Number of field elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for the empty mapping.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point index carrying `element`.
    #[inline]
    pub fn point_of(&self, element: Elt) -> usize {
        self.points[element as usize]
    }

    /// Entries in field-element order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.points
    }
}

impl core::fmt::Display for Mapping {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for p in &self.points {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(-1, -1),
            Point::new(1, -1),
            Point::new(-1, 1),
            Point::new(1, 1),
        ]
    }

    #[test]
    fn quadrance_is_symmetric() {
        let a = Point::new(-3, 1);
        let b = Point::new(1, -2);
        assert_eq!(a.quadrance(b), Some(25));
        assert_eq!(b.quadrance(a), Some(25));
        assert_eq!(a.quadrance(a), Some(0));
    }

    #[test]
    fn quadrance_overflow() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        assert_eq!(a.quadrance(b), None);
        assert_eq!(Point::new(0, 0).quadrance(Point::new(65535, 0)), Some(65535 * 65535));
    }

    #[test]
    fn constellation_sizes() {
        let c = Constellation::new(square()).unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.degree(), 2);

        for bad in [0, 1, 3, 6, 2048] {
            let pts = vec![Point::new(0, 0); bad];
            assert!(matches!(
                Constellation::new(pts),
                Err(Error::ConstellationSize { count }) if count == bad
            ));
        }
        assert!(Constellation::new(vec![Point::new(0, 0); 1024]).is_ok());
    }

    #[test]
    fn mapping_validation() {
        assert!(Mapping::new(vec![3, 1, 0, 2], 4).is_ok());
        assert!(matches!(
            Mapping::new(vec![0, 1, 2], 4),
            Err(Error::MappingLength { expected: 4, found: 3 })
        ));
        assert!(matches!(
            Mapping::new(vec![0, 1, 2, 4], 4),
            Err(Error::MappingOutOfRange { value: 4, size: 4 })
        ));
        assert!(matches!(
            Mapping::new(vec![0, 1, 1, 2], 4),
            Err(Error::MappingRepeated { value: 1 })
        ));
    }

    #[test]
    fn mapping_display() {
        let m = Mapping::new(vec![2, 0, 3, 1], 4).unwrap();
        assert_eq!(m.to_string(), "2 0 3 1");
        assert_eq!(m.point_of(2), 3);
        assert_eq!(Mapping::identity(4).as_slice(), &[0, 1, 2, 3]);
    }
}
