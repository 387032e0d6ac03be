//! Restricted views over a score matrix

use super::ScoreMatrix;
use crate::core::{Code, Score};
use std::fmt;

/// A read-only window onto a subset of a matrix's answer columns
///
/// Local column `i` maps to the root answer index `answers()[i]`. Restricting
/// a view composes the mapping, so every view refers straight to the
/// underlying matrix and costs O(restricted size) to build.
#[derive(Clone)]
pub struct MatrixView<'a> {
    matrix: &'a dyn ScoreMatrix,
    answers: Vec<usize>,
}

impl<'a> MatrixView<'a> {
    /// Create a view over the given root answer indices
    ///
    /// # Panics
    /// Panics in debug builds if an index is out of range
    #[must_use]
    pub fn new(matrix: &'a dyn ScoreMatrix, answers: Vec<usize>) -> Self {
        debug_assert!(answers.iter().all(|&a| a < matrix.len()));
        Self { matrix, answers }
    }

    /// The underlying matrix
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &'a dyn ScoreMatrix {
        self.matrix
    }

    /// Number of answer columns in the view
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Root indices of the view's answers, in local order
    #[inline]
    #[must_use]
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    /// Root index of local column `local`
    #[inline]
    #[must_use]
    pub fn answer(&self, local: usize) -> usize {
        self.answers[local]
    }

    /// Code of local column `local`
    #[must_use]
    pub fn answer_code(&self, local: usize) -> &'a Code {
        self.matrix.code_at(self.answers[local])
    }

    /// Score of root guess `guess` against local column `local`
    #[inline]
    #[must_use]
    pub fn entry(&self, guess: usize, local: usize) -> Score {
        self.matrix.entry(guess, self.answers[local])
    }

    /// Scores of `guess` against every column, in local order
    pub fn scores(&self, guess: usize) -> impl Iterator<Item = Score> + '_ {
        self.answers.iter().map(move |&a| self.matrix.entry(guess, a))
    }

    /// Restrict to a subset of this view's local columns
    #[must_use]
    pub fn restrict(&self, local: &[usize]) -> Self {
        Self::new(
            self.matrix,
            local.iter().map(|&i| self.answers[i]).collect(),
        )
    }

    /// Keep the answers that would have produced `score` for `guess`
    ///
    /// Local order is preserved.
    #[must_use]
    pub fn filter(&self, guess: usize, score: Score) -> Self {
        Self::new(
            self.matrix,
            self.answers
                .iter()
                .copied()
                .filter(|&a| self.matrix.entry(guess, a) == score)
                .collect(),
        )
    }

    /// Membership mask over the whole universe
    #[must_use]
    pub fn answer_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.matrix.len()];
        for &a in &self.answers {
            mask[a] = true;
        }
        mask
    }
}

impl fmt::Debug for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixView")
            .field("universe", &self.matrix.len())
            .field("answers", &self.answers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Code;
    use crate::matrix::{InMemoryMatrix, ScoreMatrix};

    fn matrix() -> InMemoryMatrix {
        InMemoryMatrix::for_slots(6).unwrap()
    }

    fn index(matrix: &InMemoryMatrix, text: &str) -> usize {
        matrix.index_of(&Code::new(text).unwrap()).unwrap()
    }

    #[test]
    fn full_view_covers_universe() {
        let matrix = matrix();
        let view = matrix.view();
        assert_eq!(view.len(), 206);
        assert_eq!(view.answers(), (0..206).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn restrict_reindexes_contiguously() {
        let matrix = matrix();
        let view = matrix.restrict(&[10, 20, 30]);

        assert_eq!(view.len(), 3);
        assert_eq!(view.answer(1), 20);
        assert_eq!(view.entry(5, 1), matrix.entry(5, 20));
        assert_eq!(view.answer_code(2), matrix.code_at(30));
    }

    #[test]
    fn restrictions_compose_to_root_indices() {
        let matrix = matrix();
        let outer = matrix.restrict(&[10, 20, 30, 40]);
        let inner = outer.restrict(&[3, 1]);

        assert_eq!(inner.answers(), &[40, 20]);
        assert_eq!(inner.entry(7, 0), matrix.entry(7, 40));
    }

    #[test]
    fn restricting_leaves_parent_untouched() {
        let matrix = matrix();
        let outer = matrix.restrict(&[1, 2, 3]);
        let _inner = outer.restrict(&[0]);
        assert_eq!(outer.answers(), &[1, 2, 3]);
    }

    #[test]
    fn filter_keeps_consistent_answers() {
        let matrix = matrix();
        let guess = index(&matrix, "10-5=5");
        let answer = index(&matrix, "4*3=12");
        let score = matrix.entry(guess, answer);

        let view = matrix.view().filter(guess, score);
        assert!(view.answers().contains(&answer));
        assert!(view.len() < matrix.len());
        assert!(view.scores(guess).all(|s| s == score));
        assert!(view.answers().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn answer_mask_marks_members() {
        let matrix = matrix();
        let mask = matrix.restrict(&[0, 5]).answer_mask();
        assert_eq!(mask.len(), 206);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 2);
        assert!(mask[0] && mask[5]);
    }
}
