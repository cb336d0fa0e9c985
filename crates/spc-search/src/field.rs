//! GF(2^m) arithmetic through discrete-log tables.
//!
//! Elements are integers in `0..q`. Addition is XOR (characteristic 2),
//! multiplication is addition of discrete logarithms modulo `q - 1` with
//! respect to the primitive element `alpha = x`.
//!
//! # Tabulated primitive polynomials
//!
//! | m  | q    | P(X)                      | hex    |
//! |----|------|---------------------------|--------|
//! | 1  | 2    | X + 1                     | 0x3    |
//! | 2  | 4    | X² + X + 1                | 0x7    |
//! | 3  | 8    | X³ + X + 1                | 0xb    |
//! | 4  | 16   | X⁴ + X + 1                | 0x13   |
//! | 5  | 32   | X⁵ + X² + 1               | 0x25   |
//! | 6  | 64   | X⁶ + X + 1                | 0x43   |
//! | 7  | 128  | X⁷ + X³ + 1               | 0x89   |
//! | 8  | 256  | X⁸ + X⁴ + X³ + X² + 1     | 0x11d  |
//! | 9  | 512  | X⁹ + X⁵ + 1               | 0x221  |
//! | 10 | 1024 | X¹⁰ + X³ + 1              | 0x409  |
//!
//! # Example
//!
//! ```
//! use spc_search::field::Field;
//!
//! let gf8 = Field::with_degree(3).unwrap();
//! assert_eq!(gf8.size(), 8);
//! assert_eq!(gf8.exp(3), 0b011); // alpha³ = alpha + 1
//! assert_eq!(gf8.mul(gf8.alpha(), gf8.exp(6)), 1);
//! ```

use crate::error::{Error, Result};

/// A field element, `0..q`.
pub type Elt = u32;

/// Primitive polynomials indexed by degree `m` (entry 0 is a placeholder).
pub const PRIMITIVES: [u32; 11] = [
    0x1, 0x3, 0x7, 0xb, 0x13, 0x25, 0x43, 0x89, 0x11d, 0x221, 0x409,
];

/// Largest degree with a tabulated primitive polynomial.
pub const MAX_DEGREE: u32 = 10;

/// Degree of a binary polynomial (position of the highest set bit).
///
/// Returns `None` for the zero polynomial.
#[inline]
pub const fn degree(p: u32) -> Option<u32> {
    if p == 0 {
        None
    } else {
        Some(31 - p.leading_zeros())
    }
}

/// Log/antilog tables of GF(2^m).
///
/// Built once per run and borrowed by every component that needs field
/// arithmetic, so two fields can never be mixed inside one search.
#[derive(Debug, Clone)]
pub struct Field {
    degree: u32,
    size: usize,
    poly: u32,
    /// `log[x]` for `x != 0`; `log[0]` is never read.
    log: Vec<u32>,
    /// `exp[k] = alpha^k` for `k` in `0..q-1`.
    exp: Vec<Elt>,
}

impl Field {
    /// Builds the field from a primitive polynomial in binary notation
    /// (`X³ + X + 1` is `0b1011`).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDegree`] if the degree is 0 or above 16,
    /// [`Error::NotPrimitive`] if the powers of `x` do not cycle through
    /// all `q - 1` non-zero elements.
    pub fn new(poly: u32) -> Result<Self> {
        let degree = match degree(poly) {
            Some(d) if (1..=16).contains(&d) => d,
            d => {
                return Err(Error::UnsupportedDegree {
                    degree: d.unwrap_or(0),
                    max: 16,
                })
            }
        };
        let size = 1usize << degree;
        let order = size - 1;

        let mut log = vec![0u32; size];
        let mut exp = vec![0 as Elt; order];
        let mut x: u32 = 1;
        for k in 0..order {
            log[x as usize] = k as u32;
            exp[k] = x;
            x <<= 1;
            if x as usize >= size {
                x ^= poly;
            }
            // Returning to 1 (or collapsing to 0) before q-1 steps means
            // x has a smaller multiplicative order.
            if (x == 1 && k + 1 < order) || x == 0 {
                return Err(Error::NotPrimitive {
                    poly,
                    cycle: k + 1,
                    expected: order,
                });
            }
        }
        if x != 1 {
            return Err(Error::NotPrimitive {
                poly,
                cycle: order,
                expected: order,
            });
        }

        Ok(Self {
            degree,
            size,
            poly,
            log,
            exp,
        })
    }

    /// Builds GF(2^m) from the tabulated primitive polynomial.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDegree`] unless `1 <= m <= 10`.
    pub fn with_degree(m: u32) -> Result<Self> {
        if m == 0 || m > MAX_DEGREE {
            return Err(Error::UnsupportedDegree {
                degree: m,
                max: MAX_DEGREE,
            });
        }
        Self::new(PRIMITIVES[m as usize])
    }

    /// Extension degree `m`.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Number of elements `q = 2^m`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Order of the multiplicative group, `q - 1`.
    #[inline]
    pub fn order(&self) -> usize {
        self.size - 1
    }

    /// Defining polynomial.
    #[inline]
    pub fn poly(&self) -> u32 {
        self.poly
    }

    /// The primitive element.
    #[inline]
    pub fn alpha(&self) -> Elt {
        self.exp(1)
    }

    /// `alpha^k`, exponent taken modulo `q - 1`.
    #[inline]
    pub fn exp(&self, k: u32) -> Elt {
        self.exp[k as usize % self.order()]
    }

    /// Discrete logarithm; `None` for zero.
    #[inline]
    pub fn log(&self, x: Elt) -> Option<u32> {
        if x == 0 {
            None
        } else {
            Some(self.log[x as usize])
        }
    }

    /// Field product.
    #[inline]
    pub fn mul(&self, a: Elt, b: Elt) -> Elt {
        if a == 0 || b == 0 {
            return 0;
        }
        let k = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[k % self.order()]
    }

    /// `acc += alpha^hlog * x`.
    ///
    /// `hlog` must lie in `0..q-1`. No-op when `x` is zero.
    #[inline]
    pub fn mul_acc(&self, acc: &mut Elt, hlog: u32, x: Elt) {
        if x == 0 {
            return;
        }
        let k = hlog as usize + self.log[x as usize] as usize;
        *acc ^= self.exp[k % self.order()];
    }

    /// All elements, `0..q`.
    pub fn elements(&self) -> impl Iterator<Item = Elt> {
        0..self.size as Elt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_examples() {
        assert_eq!(degree(0), None);
        assert_eq!(degree(1), Some(0));
        assert_eq!(degree(0x7), Some(2));
        assert_eq!(degree(0x409), Some(10));
    }

    #[test]
    fn every_tabulated_polynomial_is_primitive() {
        for m in 1..=MAX_DEGREE {
            let f = Field::with_degree(m).unwrap();
            assert_eq!(f.degree(), m);
            assert_eq!(f.size(), 1 << m);

            let mut seen = vec![false; f.size()];
            for k in 0..f.order() as u32 {
                let x = f.exp(k);
                assert!(x != 0 && (x as usize) < f.size());
                assert!(!seen[x as usize], "alpha^{k} repeats in GF(2^{m})");
                seen[x as usize] = true;
                assert_eq!(f.log(x), Some(k));
            }
            for x in 1..f.size() as Elt {
                assert_eq!(f.exp(f.log(x).unwrap()), x);
            }
        }
    }

    #[test]
    fn gf4_tables() {
        let f = Field::new(0x7).unwrap();
        assert_eq!((0..3).map(|k| f.exp(k)).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(f.log(0), None);
        assert_eq!(f.log(3), Some(2));
        // alpha² = alpha + 1
        assert_eq!(f.mul(2, 2), 3);
        assert_eq!(f.mul(3, 3), 2);
    }

    #[test]
    fn gf2_is_trivial_but_valid() {
        let f = Field::with_degree(1).unwrap();
        assert_eq!(f.size(), 2);
        assert_eq!(f.order(), 1);
        assert_eq!(f.mul(1, 1), 1);
        let mut acc = 0;
        f.mul_acc(&mut acc, 0, 1);
        assert_eq!(acc, 1);
    }

    #[test]
    fn rejects_non_primitive() {
        // X⁴ + X³ + X² + X + 1 is irreducible but alpha has order 5.
        assert!(matches!(
            Field::new(0x1f),
            Err(Error::NotPrimitive {
                cycle: 5,
                expected: 15,
                ..
            })
        ));
        // X² + 1 = (X + 1)²
        assert!(matches!(Field::new(0x5), Err(Error::NotPrimitive { .. })));
        // X² + X: powers of x stall at x and never return to 1
        assert!(matches!(Field::new(0x6), Err(Error::NotPrimitive { .. })));
    }

    #[test]
    fn rejects_bad_degree() {
        assert!(matches!(
            Field::with_degree(0),
            Err(Error::UnsupportedDegree { degree: 0, .. })
        ));
        assert!(matches!(
            Field::with_degree(11),
            Err(Error::UnsupportedDegree { degree: 11, .. })
        ));
        assert!(matches!(Field::new(1), Err(Error::UnsupportedDegree { .. })));
    }

    #[test]
    fn mul_acc_matches_mul() {
        let f = Field::with_degree(4).unwrap();
        for h in 0..f.order() as u32 {
            for x in f.elements() {
                let mut acc = 0b1010;
                f.mul_acc(&mut acc, h, x);
                assert_eq!(acc, 0b1010 ^ f.mul(f.exp(h), x));
            }
        }
    }
}
