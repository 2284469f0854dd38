//! Permutations
//!
//! Lazy lexicographic enumeration of the orderings of `0..n`. Only the current
//! ordering is held, so iterating `n!` orderings needs `O(n)` memory.

use smallvec::SmallVec;

/// Iterator over every ordering of `0..n`, starting from the identity.
///
/// Indices are treated as distinct, so duplicate promotions still produce
/// separate orderings.
#[derive(Debug, Clone)]
pub struct Permutations {
    indices: SmallVec<[usize; 10]>,
    started: bool,
    exhausted: bool,
}

impl Permutations {
    /// Create a generator over the orderings of `0..n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            started: false,
            exhausted: false,
        }
    }

    /// Number of orderings of `n` elements, if it fits in a `usize`.
    #[must_use]
    pub fn count_for(n: usize) -> Option<usize> {
        (1..=n).try_fold(1usize, usize::checked_mul)
    }
}

impl Iterator for Permutations {
    type Item = SmallVec<[usize; 10]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;

            return Some(self.indices.clone());
        }

        if next_permutation(&mut self.indices) {
            Some(self.indices.clone())
        } else {
            self.exhausted = true;

            None
        }
    }
}

/// Advance `indices` to the next ordering in lexicographic order, returning `false` once the
/// last ordering has been reached.
fn next_permutation(indices: &mut [usize]) -> bool {
    let Some(pivot) = indices
        .windows(2)
        .rposition(|pair| matches!(pair, [a, b] if a < b))
    else {
        return false;
    };

    let Some(&pivot_value) = indices.get(pivot) else {
        return false;
    };

    // The suffix after the pivot is descending, so the rightmost larger value is the successor.
    let Some(successor) = indices.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };

    indices.swap(pivot, successor);

    if let Some(suffix) = indices.get_mut(pivot + 1..) {
        suffix.reverse();
    }

    true
}
