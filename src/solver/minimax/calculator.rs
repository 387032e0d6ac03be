//! Minimax worst-case calculation over score buckets
//!
//! A guess partitions the candidate answers by the score each would produce.
//! The size of the largest bucket is how many candidates can survive the
//! guess in the worst case.

use crate::core::Score;
use crate::matrix::MatrixView;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Calculate the largest bucket a guess leaves among the view's answers
///
/// Returns 0 for an empty view.
///
/// # Examples
/// ```
/// use nerdle_solver::core::Code;
/// use nerdle_solver::matrix::{InMemoryMatrix, ScoreMatrix};
/// use nerdle_solver::solver::minimax::max_bucket_size;
///
/// let matrix = InMemoryMatrix::for_slots(6).unwrap();
/// let guess = matrix.index_of(&Code::new("10-5=5").unwrap()).unwrap();
///
/// let worst = max_bucket_size(&matrix.view(), guess);
/// assert!(worst > 0 && worst < matrix.len());
/// ```
#[must_use]
pub fn max_bucket_size(view: &MatrixView<'_>, guess: usize) -> usize {
    bucket_sizes(view, guess).into_values().max().unwrap_or(0)
}

/// Largest bucket when only the given local columns are scored
///
/// Used by sampling estimators that look at a subset of the answers.
#[must_use]
pub fn sampled_max_bucket_size(view: &MatrixView<'_>, guess: usize, columns: &[usize]) -> usize {
    let mut counts: FxHashMap<Score, usize> = FxHashMap::default();
    for &local in columns {
        *counts.entry(view.entry(guess, local)).or_insert(0) += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Count the view's answers per score for a guess
#[must_use]
pub fn bucket_sizes(view: &MatrixView<'_>, guess: usize) -> FxHashMap<Score, usize> {
    let mut counts = FxHashMap::default();

    for score in view.scores(guess) {
        *counts.entry(score).or_insert(0) += 1;
    }

    counts
}

/// Split the view's local columns into buckets keyed by score
///
/// Buckets are ordered by score and keep local order inside each bucket.
#[must_use]
pub fn partition(view: &MatrixView<'_>, guess: usize) -> BTreeMap<Score, Vec<usize>> {
    let mut buckets: BTreeMap<Score, Vec<usize>> = BTreeMap::new();

    for (local, score) in view.scores(guess).enumerate() {
        buckets.entry(score).or_default().push(local);
    }

    buckets
}
