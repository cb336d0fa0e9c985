//! Distance spectra and their order.
//!
//! A spectrum counts, per quadrance below `qmax`, the (codeword, neighbor)
//! pairs found at that quadrance. Spectra are compared lexicographically
//! from a lower bound `qmin` upward, and the side with fewer pairs at the
//! first differing quadrance is the better one. Adding pairs never makes a
//! spectrum better, which is what lets a search drop a candidate as soon
//! as its partial spectrum falls behind.

use core::cmp::Ordering;
use core::fmt;

/// Histogram of pair quadrances in `0..qmax`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Spectrum {
    counts: Vec<u64>,
}

impl Spectrum {
    /// All-zero spectrum covering quadrances `0..qmax`.
    pub fn new(qmax: u32) -> Self {
        Self {
            counts: vec![0; qmax as usize],
        }
    }

    /// Spectrum with the given counts.
    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    /// Exclusive upper bound on recorded quadrances.
    #[inline]
    pub fn qmax(&self) -> u32 {
        self.counts.len() as u32
    }

    /// Counts indexed by quadrance.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count at quadrance `d` (0 beyond `qmax`).
    #[inline]
    pub fn get(&self, d: u32) -> u64 {
        self.counts.get(d as usize).copied().unwrap_or(0)
    }

    /// Counts one pair at `quadrance`; ignored if `quadrance >= qmax`.
    #[inline]
    pub fn record(&mut self, quadrance: u64) {
        if let Some(c) = usize::try_from(quadrance)
            .ok()
            .and_then(|d| self.counts.get_mut(d))
        {
            *c += 1;
        }
    }

    /// Zeroes every count.
    pub fn reset(&mut self) {
        self.counts.fill(0);
    }

    /// Total number of recorded pairs.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts from `qmin` upward.
    pub fn window(&self, qmin: u32) -> &[u64] {
        let start = (qmin as usize).min(self.counts.len());
        &self.counts[start..]
    }

    /// Pairs recorded at quadrances `qmin..qmax`.
    pub fn total_from(&self, qmin: u32) -> u64 {
        self.window(qmin).iter().sum()
    }

    /// Orders two spectra on quadrances `qmin..`; [`Ordering::Less`] means
    /// `self` is better (fewer pairs at the first quadrance where they
    /// differ).
    pub fn compare_from(&self, other: &Self, qmin: u32) -> Ordering {
        self.window(qmin).cmp(other.window(qmin))
    }

    /// Writes the counts from `qmin` upward, tab separated.
    pub fn write_window(&self, f: &mut impl fmt::Write, qmin: u32) -> fmt::Result {
        let mut first = true;
        for c in self.window(qmin) {
            if !first {
                f.write_char('\t')?;
            }
            write!(f, "{c}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Display for Spectrum {
    /// Every count, tab separated, then the total in parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_window(f, 0)?;
        write!(f, "\t({})", self.total())
    }
}

/// A spectrum together with the lowest quadrance that takes part in
/// comparisons.
///
/// This is the score of the spectrum search: its `Display` shows only the
/// compared window, followed by the number of pairs in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpectrumScore {
    /// First compared quadrance.
    pub qmin: u32,
    /// Full histogram, including quadrances below `qmin`.
    pub spectrum: Spectrum,
}

impl SpectrumScore {
    /// Empty score covering `qmin..qmax`.
    pub fn new(qmin: u32, qmax: u32) -> Self {
        Self {
            qmin,
            spectrum: Spectrum::new(qmax),
        }
    }

    /// [`Spectrum::compare_from`] at this score's `qmin`.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.spectrum.compare_from(&other.spectrum, self.qmin)
    }
}

impl fmt::Display for SpectrumScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.spectrum.write_window(f, self.qmin)?;
        write!(f, "\t({})", self.spectrum.total_from(self.qmin))
    }
}
