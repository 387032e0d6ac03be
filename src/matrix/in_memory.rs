//! Precomputed score matrix held in memory

use super::{ScoreMatrix, prepare_codes};
use crate::core::{Code, NerdleError, Score};
use crate::generator::universe;
use crate::output::formatters::progress_bar;
use rayon::prelude::*;

/// Row-major table of every guess × answer score
///
/// Rows are scored in parallel; each worker writes only its own row, so the
/// table is identical however the work is scheduled.
#[derive(Debug, Clone)]
pub struct InMemoryMatrix {
    codes: Vec<Code>,
    num_slots: usize,
    scores: Vec<Score>,
}

impl InMemoryMatrix {
    /// Build the matrix for a code list
    ///
    /// Codes are sorted and deduplicated first, so indices follow universe
    /// order.
    ///
    /// # Errors
    /// Returns an error if `codes` is empty or the codes differ in length.
    pub fn new(codes: Vec<Code>) -> Result<Self, NerdleError> {
        Self::build(codes, false)
    }

    /// Build the matrix for the full universe of `num_slots`
    ///
    /// # Errors
    /// Returns an error if the universe cannot be generated.
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::matrix::{InMemoryMatrix, ScoreMatrix};
    ///
    /// let matrix = InMemoryMatrix::for_slots(6).unwrap();
    /// assert_eq!(matrix.len(), 206);
    /// assert!(matrix.entry(0, 0).is_all_correct(6));
    /// ```
    pub fn for_slots(num_slots: usize) -> Result<Self, NerdleError> {
        Self::build(universe(num_slots)?, false)
    }

    /// Build the matrix, optionally showing a progress bar over rows
    ///
    /// # Errors
    /// Returns an error if `codes` is empty or the codes differ in length.
    pub fn build(codes: Vec<Code>, show_progress: bool) -> Result<Self, NerdleError> {
        let (codes, num_slots) = prepare_codes(codes)?;
        let n = codes.len();

        let pb = show_progress.then(|| {
            let pb = progress_bar(n as u64);
            pb.set_message(format!("Scoring {n}×{n} matrix"));
            pb
        });

        let mut scores = vec![Score::default(); n * n];
        scores
            .par_chunks_mut(n)
            .zip(codes.par_iter())
            .for_each(|(row, guess)| {
                for (slot, answer) in row.iter_mut().zip(&codes) {
                    *slot = Score::calculate(guess, answer);
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
            });

        if let Some(pb) = pb {
            pb.finish_with_message("Matrix ready");
        }

        Ok(Self {
            codes,
            num_slots,
            scores,
        })
    }

    /// All scores of one guess row
    ///
    /// # Panics
    /// Panics if `guess` is out of range
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[Score] {
        let n = self.codes.len();
        &self.scores[guess * n..(guess + 1) * n]
    }
}

impl ScoreMatrix for InMemoryMatrix {
    fn num_slots(&self) -> usize {
        self.num_slots
    }

    fn codes(&self) -> &[Code] {
        &self.codes
    }

    #[inline]
    fn entry(&self, guess: usize, answer: usize) -> Score {
        self.scores[guess * self.codes.len() + answer]
    }

    fn as_dyn(&self) -> &dyn ScoreMatrix {
        self
    }
}
