//! Sources of hints for a running game
//!
//! The solver asks a [`HintSource`] for the score of each guess. The source
//! may know the answer, replay recorded hints, or ask a human.

use crate::core::{Code, Score};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Anything that can score a guess against a hidden answer
///
/// Errors are the collaborator's own and are passed through the solver
/// unchanged.
pub trait HintSource {
    /// Score `guess`
    ///
    /// # Errors
    /// Returns an error if no score can be produced for `guess`.
    fn hint(&mut self, guess: &Code) -> Result<Score>;
}

impl<F> HintSource for F
where
    F: FnMut(&Code) -> Result<Score>,
{
    fn hint(&mut self, guess: &Code) -> Result<Score> {
        self(guess)
    }
}

/// Scores guesses against a known answer
///
/// # Examples
/// ```
/// use nerdle_solver::core::Code;
/// use nerdle_solver::solver::{HintSource, KnownAnswer};
///
/// let mut source = KnownAnswer::new(Code::new("4*3=12").unwrap());
/// let score = source.hint(&Code::new("10-5=5").unwrap()).unwrap();
/// assert_eq!(score.to_hint_string(6), "?---?-");
/// ```
#[derive(Debug, Clone)]
pub struct KnownAnswer {
    answer: Code,
}

impl KnownAnswer {
    #[must_use]
    pub const fn new(answer: Code) -> Self {
        Self { answer }
    }

    #[must_use]
    pub const fn answer(&self) -> &Code {
        &self.answer
    }
}

impl HintSource for KnownAnswer {
    fn hint(&mut self, guess: &Code) -> Result<Score> {
        if guess.len() != self.answer.len() {
            bail!(
                "guess {guess} has {} slots, answer has {}",
                guess.len(),
                self.answer.len()
            );
        }
        Ok(Score::calculate(guess, &self.answer))
    }
}

/// Replays hint strings, one per line, in guess order
///
/// Blank lines are skipped. Each line uses the glyphs `+ ? -` (or the
/// colored squares) and must have one glyph per slot.
#[derive(Debug)]
pub struct ReplayHints<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> ReplayHints<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl ReplayHints<BufReader<File>> {
    /// Replay hints recorded in a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening hint file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> HintSource for ReplayHints<R> {
    fn hint(&mut self, guess: &Code) -> Result<Score> {
        loop {
            let Some(line) = self.lines.next() else {
                bail!("no recorded hint left for guess {guess}");
            };
            self.line_number += 1;
            let line = line.with_context(|| format!("reading hint line {}", self.line_number))?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let glyphs = text.chars().count();
            if glyphs != guess.len() {
                bail!(
                    "hint {text:?} on line {} has {glyphs} slots, guess {guess} has {}",
                    self.line_number,
                    guess.len()
                );
            }

            return Score::from_hint_string(text)
                .with_context(|| format!("parsing hint line {}", self.line_number));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn code(text: &str) -> Code {
        Code::new(text).unwrap()
    }

    #[test]
    fn known_answer_scores_guesses() {
        let mut source = KnownAnswer::new(code("54/9=6"));
        let score = source.hint(&code("4*7=28")).unwrap();
        assert_eq!(score, Score::calculate(&code("4*7=28"), &code("54/9=6")));
        assert!(source.hint(&code("54/9=6")).unwrap().is_all_correct(6));
        assert_eq!(source.answer().text(), "54/9=6");
    }

    #[test]
    fn known_answer_rejects_wrong_length() {
        let mut source = KnownAnswer::new(code("54/9=6"));
        assert!(source.hint(&code("1+2=3")).is_err());
    }

    #[test]
    fn replay_reads_lines_in_order() {
        let mut source = ReplayHints::new(Cursor::new("?---?-\n\n  ?+-+??\n++++++\n"));
        let guess = code("10-5=5");

        assert_eq!(source.hint(&guess).unwrap().to_hint_string(6), "?---?-");
        assert_eq!(source.hint(&guess).unwrap().to_hint_string(6), "?+-+??");
        assert!(source.hint(&guess).unwrap().is_all_correct(6));
        assert!(source.hint(&guess).is_err());
    }

    #[test]
    fn replay_rejects_bad_lines() {
        let guess = code("10-5=5");
        assert!(ReplayHints::new(Cursor::new("?---\n")).hint(&guess).is_err());
        assert!(ReplayHints::new(Cursor::new("?--x?-\n")).hint(&guess).is_err());
    }

    #[test]
    fn replay_accepts_emoji() {
        let mut source = ReplayHints::new(Cursor::new("🟪⬛⬛⬛🟪⬛"));
        let score = source.hint(&code("10-5=5")).unwrap();
        assert_eq!(score.to_hint_string(6), "?---?-");
    }

    #[test]
    fn closures_are_sources() {
        let mut calls = 0;
        {
            let mut source = |_: &Code| {
                calls += 1;
                Ok::<_, anyhow::Error>(Score::all_correct(6))
            };
            assert!(source.hint(&code("10-5=5")).unwrap().is_all_correct(6));
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ReplayHints::from_file("/nonexistent/hints.txt").is_err());
    }
}
