//! Lexicographic enumeration of `k`-subsets
//!
//! Subsets are produced as sorted index vectors in lexicographic order, which
//! is the order of the classic "fix the smallest index, recurse on the rest"
//! recursion. The iterator is lazy; only the current index vector is kept.

use std::iter::FusedIterator;

use crate::error::{RecoverError, Result};
use crate::share::Share;

/// Iterator over every `k`-combination of `0..n`
///
/// # Example
/// ```
/// use shamir_recover::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).unwrap().collect();
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// assert_eq!(all.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Creates an enumerator over `k`-subsets of `n` items
    ///
    /// # Errors
    /// Returns `RecoverError::InvalidThreshold` unless `1 <= k <= n`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if k == 0 || k > n {
            return Err(RecoverError::InvalidThreshold {
                threshold: k,
                total_shares: n,
            });
        }

        Ok(Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: false,
        })
    }

    /// Advances `indices` to the next combination, returning false after the last one
    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            return false;
        };

        self.indices[pos] += 1;
        for j in pos + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }

        Some(self.indices.clone())
    }
}

impl FusedIterator for Combinations {}

/// Lazily yields every `k`-subset of `shares`, members in input order
pub fn candidates(shares: &[Share], k: usize) -> Result<impl Iterator<Item = Vec<&Share>>> {
    Ok(Combinations::new(shares.len(), k)?
        .map(move |indices| indices.into_iter().map(|i| &shares[i]).collect()))
}

/// `C(n, k)`, or `None` when it does not fit in a `u64`
pub fn candidate_count(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }

    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut count: u128 = 1;
    for i in 1..=k {
        // count * (n - k + i) is divisible by i at every step
        count = count.checked_mul(n - k + i)? / i;
    }
    u64::try_from(count).ok()
}
