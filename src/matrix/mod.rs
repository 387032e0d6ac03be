//! Guess × answer score tables
//!
//! Every consumer reads scores through [`ScoreMatrix`], so the solver and the
//! tree builder never care whether scores were precomputed or are scored on
//! request. Narrowing to a subset of answers goes through [`MatrixView`].

mod in_memory;
mod on_demand;
mod view;

pub use in_memory::InMemoryMatrix;
pub use on_demand::OnDemandMatrix;
pub use view::MatrixView;

use crate::core::{Code, NerdleError, Score, check_slots};

/// A square table of scores over one code universe
///
/// Rows are guesses and columns answers, both addressed by universe index.
/// Implementations must return exactly [`Score::calculate`] for every pair.
pub trait ScoreMatrix {
    /// Slot count shared by every code
    fn num_slots(&self) -> usize;

    /// The universe in index order
    fn codes(&self) -> &[Code];

    /// Score of guess index `guess` against answer index `answer`
    ///
    /// # Panics
    /// Panics if either index is out of range
    fn entry(&self, guess: usize, answer: usize) -> Score;

    /// This matrix as a trait object, for building views
    fn as_dyn(&self) -> &dyn ScoreMatrix;

    /// A view over every answer column
    fn view(&self) -> MatrixView<'_> {
        MatrixView::new(self.as_dyn(), (0..self.len()).collect())
    }

    /// Number of codes
    fn len(&self) -> usize {
        self.codes().len()
    }

    /// Whether the universe is empty (never true for a built matrix)
    fn is_empty(&self) -> bool {
        self.codes().is_empty()
    }

    /// Code at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range
    fn code_at(&self, index: usize) -> &Code {
        &self.codes()[index]
    }

    /// Index of `code`, if it belongs to the universe
    fn index_of(&self, code: &Code) -> Option<usize> {
        self.codes().binary_search(code).ok()
    }

    /// A view restricted to the given answer indices
    ///
    /// The view is re-indexed contiguously: local column `i` is
    /// `answers[i]`. Costs O(`answers.len()`), independent of the universe
    /// size.
    fn restrict(&self, answers: &[usize]) -> MatrixView<'_> {
        MatrixView::new(self.as_dyn(), answers.to_vec())
    }
}

/// Sort, deduplicate and check a code list before building a matrix
///
/// Returns the prepared codes and their common slot count.
fn prepare_codes(mut codes: Vec<Code>) -> Result<(Vec<Code>, usize), NerdleError> {
    let Some(first) = codes.first() else {
        return Err(NerdleError::InvalidConfig(
            "a score matrix needs at least one code".to_string(),
        ));
    };
    let num_slots = check_slots(first.len())?;

    if let Some(odd) = codes.iter().find(|c| c.len() != num_slots) {
        return Err(NerdleError::SlotMismatch {
            expected: num_slots,
            found: odd.len(),
        });
    }

    codes.sort_unstable();
    codes.dedup();
    Ok((codes, num_slots))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|t| Code::new(*t).unwrap()).collect()
    }

    #[test]
    fn prepare_sorts_and_dedups() {
        let (prepared, slots) = prepare_codes(codes(&["9-3=6", "1+2=3", "9-3=6"])).unwrap();
        assert_eq!(slots, 5);
        assert_eq!(prepared, codes(&["1+2=3", "9-3=6"]));
    }

    #[test]
    fn prepare_rejects_mixed_lengths() {
        let err = prepare_codes(codes(&["1+2=3", "4*3=12"])).unwrap_err();
        assert_eq!(
            err,
            NerdleError::SlotMismatch {
                expected: 5,
                found: 6
            }
        );
    }

    #[test]
    fn prepare_rejects_empty() {
        assert!(matches!(
            prepare_codes(Vec::new()),
            Err(NerdleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn backends_agree() {
        let universe = crate::generator::universe(5).unwrap();
        let stored = InMemoryMatrix::new(universe.clone()).unwrap();
        let lazy = OnDemandMatrix::new(universe).unwrap();

        assert_eq!(stored.codes(), lazy.codes());
        for g in (0..stored.len()).step_by(7) {
            for a in 0..stored.len() {
                assert_eq!(stored.entry(g, a), lazy.entry(g, a));
            }
        }
    }

    #[test]
    fn diagonal_is_all_correct() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        for i in 0..matrix.len() {
            assert!(matrix.entry(i, i).is_all_correct(6), "{}", matrix.code_at(i));
        }
    }

    #[test]
    fn index_of_round_trips() {
        let matrix = OnDemandMatrix::for_slots(6).unwrap();
        for (i, code) in matrix.codes().iter().enumerate() {
            assert_eq!(matrix.index_of(code), Some(i));
        }
        assert_eq!(matrix.index_of(&Code::new("1+1=3").unwrap()), None);
    }

    /// Delegates to an inner matrix and counts full-view requests
    struct CountingViews {
        inner: InMemoryMatrix,
        views: std::cell::Cell<usize>,
    }

    impl ScoreMatrix for CountingViews {
        fn num_slots(&self) -> usize {
            self.inner.num_slots()
        }

        fn codes(&self) -> &[Code] {
            self.inner.codes()
        }

        fn entry(&self, guess: usize, answer: usize) -> Score {
            self.inner.entry(guess, answer)
        }

        fn as_dyn(&self) -> &dyn ScoreMatrix {
            self
        }

        fn view(&self) -> MatrixView<'_> {
            self.views.set(self.views.get() + 1);
            MatrixView::new(self, (0..self.len()).collect())
        }
    }

    #[test]
    fn restrict_does_not_build_a_full_view() {
        let matrix = CountingViews {
            inner: InMemoryMatrix::for_slots(7).unwrap(),
            views: std::cell::Cell::new(0),
        };

        let view = matrix.restrict(&[3]);
        assert_eq!(matrix.views.get(), 0);
        assert_eq!(view.answers(), &[3]);
        assert_eq!(view.entry(3, 0), matrix.inner.entry(3, 3));

        let narrower = view.restrict(&[0]);
        assert_eq!(matrix.views.get(), 0);
        assert_eq!(narrower.answers(), &[3]);

        assert_eq!(matrix.view().len(), 7561);
        assert_eq!(matrix.views.get(), 1);
    }

    #[test]
    fn works_through_trait_objects() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let dynamic: &dyn ScoreMatrix = &matrix;

        let view = dynamic.restrict(&[3, 1, 4]);
        assert_eq!(view.answers(), &[3, 1, 4]);
        assert_eq!(view.entry(0, 2), matrix.entry(0, 4));
    }
}
