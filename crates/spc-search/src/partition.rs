//! Integer partitions and their distinct permutations.
//!
//! The sieve splits a target quadrance over the `n` coordinates of a pair:
//! every way to write it as an ordered sum of `n` non-negative parts is a
//! permutation of a partition with at most `n` non-zero parts. Both are
//! stepped in place over caller-owned buffers, the same way
//! [`Combinations`](crate::combination::Combinations) steps subsets.

/// Writes the first partition of `total` with parts at most `largest` into
/// `p`, greedily: `largest, largest, ..., rest, 0, ...`.
///
/// Partitions are non-increasing and padded with zeros to `p.len()`.
/// Returns `false` if `p.len()` parts of at most `largest` cannot reach
/// `total`. Zero has the single all-zero partition.
pub fn first_partition(p: &mut [u32], total: u32, largest: u32) -> bool {
    if u64::from(largest) * (p.len() as u64) < u64::from(total) {
        return false;
    }
    let mut left = total;
    for s in p.iter_mut() {
        let take = left.min(largest);
        *s = take;
        left -= take;
    }
    true
}

/// Steps the partition `p` to its successor in reverse lexicographic
/// order, keeping the sum and the length.
///
/// The rightmost part that can shrink by one is shrunk and everything to
/// its right is refilled greedily with parts no larger than it:
///
/// ```text
/// 5 in 3 parts:  500 410 320 311 221
/// ```
///
/// Returns `false` after the last partition, leaving `p` unchanged.
pub fn next_partition(p: &mut [u32]) -> bool {
    let k = p.len();
    // Sum of p[j+1..]; never more than the total.
    let mut rest = 0u32;
    for j in (0..k).rev() {
        if p[j] > 0 {
            let v = p[j] - 1;
            let refill = rest + 1;
            let slots = (k - j - 1) as u64;
            if u64::from(v) * slots >= u64::from(refill) {
                p[j] = v;
                let mut left = refill;
                for s in &mut p[j + 1..] {
                    let take = left.min(v);
                    *s = take;
                    left -= take;
                }
                return true;
            }
        }
        rest += p[j];
    }
    false
}

/// Steps `v` to its next permutation in lexicographic order.
///
/// Repeated values are handled, so starting from the sorted order every
/// distinct arrangement is produced once. Returns `false` (leaving `v` in
/// non-increasing order) after the last one.
pub fn next_permutation(v: &mut [u32]) -> bool {
    let Some(j) = v.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(k) = v.iter().rposition(|&e| e > v[j]) else {
        return false;
    };
    v.swap(j, k);
    v[j + 1..].reverse();
    true
}

/// Ordered splits of `total` into parts no larger than `largest`.
///
/// Splits come grouped by partition, partitions in reverse lexicographic
/// order and each group in lexicographic order. Two buffers of the same
/// length carry the state: the current partition and the current split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositions {
    total: u32,
    largest: u32,
}

impl Compositions {
    /// Splits of `total` with every part at most `largest`.
    #[inline]
    pub const fn new(total: u32, largest: u32) -> Self {
        Self { total, largest }
    }

    /// Writes the first partition and its first arrangement.
    ///
    /// Returns `false` if there is no split at all.
    pub fn first(&self, partition: &mut [u32], split: &mut [u32]) -> bool {
        if !first_partition(partition, self.total, self.largest) {
            return false;
        }
        arrange(partition, split);
        true
    }

    /// Steps to the next arrangement of the current partition, or to the
    /// first arrangement of the next partition.
    pub fn advance(&self, partition: &mut [u32], split: &mut [u32]) -> bool {
        next_permutation(split) || self.skip(partition, split)
    }

    /// Drops what is left of the current partition and moves to the first
    /// arrangement of the next one.
    pub fn skip(&self, partition: &mut [u32], split: &mut [u32]) -> bool {
        if !next_partition(partition) {
            return false;
        }
        arrange(partition, split);
        true
    }
}

/// Lowest arrangement of a non-increasing partition: its reverse.
fn arrange(partition: &[u32], split: &mut [u32]) {
    for (s, &p) in split.iter_mut().zip(partition.iter().rev()) {
        *s = p;
    }
}
