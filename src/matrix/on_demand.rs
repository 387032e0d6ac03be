//! Score matrix that computes entries when asked

use super::{ScoreMatrix, prepare_codes};
use crate::core::{Code, NerdleError, Score};
use crate::generator::universe;

/// Matrix without storage: each entry is scored on request
///
/// Trades time for memory; useful for large universes where only a few rows
/// are ever read.
#[derive(Debug, Clone)]
pub struct OnDemandMatrix {
    codes: Vec<Code>,
    num_slots: usize,
}

impl OnDemandMatrix {
    /// Wrap a code list
    ///
    /// # Errors
    /// Returns an error if `codes` is empty or the codes differ in length.
    pub fn new(codes: Vec<Code>) -> Result<Self, NerdleError> {
        let (codes, num_slots) = prepare_codes(codes)?;
        Ok(Self { codes, num_slots })
    }

    /// Wrap the full universe of `num_slots`
    ///
    /// # Errors
    /// Returns an error if the universe cannot be generated.
    pub fn for_slots(num_slots: usize) -> Result<Self, NerdleError> {
        Self::new(universe(num_slots)?)
    }
}

impl ScoreMatrix for OnDemandMatrix {
    fn num_slots(&self) -> usize {
        self.num_slots
    }

    fn codes(&self) -> &[Code] {
        &self.codes
    }

    #[inline]
    fn entry(&self, guess: usize, answer: usize) -> Score {
        Score::calculate(&self.codes[guess], &self.codes[answer])
    }

    fn as_dyn(&self) -> &dyn ScoreMatrix {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_on_request() {
        let codes = vec![
            Code::new("10-5=5").unwrap(),
            Code::new("4*3=12").unwrap(),
        ];
        let matrix = OnDemandMatrix::new(codes).unwrap();

        assert_eq!(matrix.num_slots(), 6);
        let guess = matrix.index_of(&Code::new("10-5=5").unwrap()).unwrap();
        let answer = matrix.index_of(&Code::new("4*3=12").unwrap()).unwrap();
        assert_eq!(matrix.entry(guess, answer).to_hint_string(6), "?---?-");
        assert!(matrix.entry(answer, answer).is_all_correct(6));
    }

    #[test]
    fn rejects_unsupported_lengths() {
        assert!(OnDemandMatrix::for_slots(4).is_err());
        assert!(OnDemandMatrix::for_slots(0).is_err());
    }
}
