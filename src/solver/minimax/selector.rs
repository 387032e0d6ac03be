//! Minimax guess selection
//!
//! Picks the guess whose worst-case bucket is smallest. Ties go to a guess
//! that could itself be the answer, then to the lowest universe index, so
//! selection is deterministic.

use super::calculator::max_bucket_size;
use crate::matrix::MatrixView;
use std::cmp::Ordering;

/// Select best guess by minimizing worst-case remaining candidates
///
/// Returns the chosen root guess index and its worst-case bucket size, or
/// `None` if the guess pool is empty.
///
/// # Examples
/// ```
/// use nerdle_solver::matrix::{InMemoryMatrix, ScoreMatrix};
/// use nerdle_solver::solver::minimax::select_best_guess;
///
/// let matrix = InMemoryMatrix::for_slots(6).unwrap();
/// let pool: Vec<usize> = (0..matrix.len()).collect();
///
/// let (guess, worst) = select_best_guess(&pool, &matrix.view()).unwrap();
/// assert!(worst < matrix.len());
/// assert!(guess < matrix.len());
/// ```
#[must_use]
pub fn select_best_guess(guess_pool: &[usize], candidates: &MatrixView<'_>) -> Option<(usize, usize)> {
    let is_candidate = candidates.answer_mask();

    guess_pool
        .iter()
        .map(|&guess| (guess, max_bucket_size(candidates, guess)))
        .min_by_key(|&(guess, max)| (max, !is_candidate[guess], guess))
}

/// Select the guess with the lowest estimated worst case
///
/// `estimates[i]` belongs to `guess_pool[i]`. Ties are broken as in
/// [`select_best_guess`].
///
/// # Panics
/// Panics if `estimates` is shorter than `guess_pool`
#[must_use]
pub fn select_by_estimate(
    guess_pool: &[usize],
    estimates: &[f64],
    candidates: &MatrixView<'_>,
) -> Option<(usize, f64)> {
    assert!(estimates.len() >= guess_pool.len(), "one estimate per guess");
    let is_candidate = candidates.answer_mask();

    guess_pool
        .iter()
        .copied()
        .zip(estimates.iter().copied())
        .min_by(|&(ga, ea), &(gb, eb)| {
            ea.total_cmp(&eb)
                .then_with(|| tie_break(&is_candidate, ga, gb))
        })
}

fn tie_break(is_candidate: &[bool], a: usize, b: usize) -> Ordering {
    (!is_candidate[a], a).cmp(&(!is_candidate[b], b))
}
