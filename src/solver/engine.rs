//! Main Nerdle solver interface

use super::hints::HintSource;
use super::minimax::select_best_guess;
use crate::core::{Code, NerdleError, Score};
use crate::matrix::{MatrixView, ScoreMatrix};
use crate::output::formatters::hint_tiles;

/// Opening guess used for 6-slot games when none is configured
pub const DEFAULT_OPENER: &str = "10-5=5";

/// Configuration for a single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// First guess; `None` picks the default opener
    pub initial_guess: Option<Code>,

    /// Guess budget, including the first guess (default: 6)
    pub max_guesses: usize,

    /// Print each guess, hint and remaining candidate count
    pub verbose: bool,
}

impl SolverConfig {
    pub const DEFAULT_MAX_GUESSES: usize = 6;

    /// Create a configuration with a custom guess budget
    #[must_use]
    pub const fn new(max_guesses: usize) -> Self {
        Self {
            initial_guess: None,
            max_guesses,
            verbose: false,
        }
    }

    /// Start every game with `guess`
    #[must_use]
    pub fn with_initial_guess(mut self, guess: Code) -> Self {
        self.initial_guess = Some(guess);
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_GUESSES)
    }
}

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the hint of the current guess
    Playing,
    /// The last hint was all Correct
    Solved,
    /// The guess budget ran out first
    Exhausted,
}

/// Trace of a solved game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedGame {
    /// Every guess made; the last one is the answer
    pub guesses: Vec<Code>,
    /// The hint received for each guess
    pub hints: Vec<Score>,
    /// Candidates left after each hint
    pub candidate_sizes: Vec<usize>,
}

impl SolvedGame {
    #[must_use]
    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    /// The solved answer
    ///
    /// # Panics
    /// Panics if the trace is empty, which `Solver` never produces
    #[must_use]
    pub fn answer(&self) -> &Code {
        self.guesses.last().expect("a solved game has at least one guess")
    }
}

/// Result of playing a game to the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Solved(SolvedGame),
    /// The budget ran out; no trace is kept
    Exhausted,
}

impl GameOutcome {
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    #[must_use]
    pub const fn solved(&self) -> Option<&SolvedGame> {
        match self {
            Self::Solved(game) => Some(game),
            Self::Exhausted => None,
        }
    }
}

/// Adaptive minimax solver for one game
///
/// Each hint narrows the candidate answers; the next guess is the code from
/// the whole universe with the smallest worst-case bucket over the remaining
/// candidates, preferring a candidate and then the lowest index on ties.
///
/// A solver plays a single game; [`Solver::play`] consumes it.
///
/// # Examples
/// ```
/// use nerdle_solver::core::Code;
/// use nerdle_solver::matrix::InMemoryMatrix;
/// use nerdle_solver::solver::{KnownAnswer, Solver, SolverConfig};
///
/// let matrix = InMemoryMatrix::for_slots(6).unwrap();
/// let solver = Solver::new(&matrix, SolverConfig::default()).unwrap();
///
/// let mut source = KnownAnswer::new(Code::new("54/9=6").unwrap());
/// let outcome = solver.play(&mut source).unwrap();
///
/// let game = outcome.solved().unwrap();
/// assert_eq!(game.answer().text(), "54/9=6");
/// assert!(game.num_guesses() <= 6);
/// ```
pub struct Solver<'a> {
    matrix: &'a dyn ScoreMatrix,
    config: SolverConfig,
    guess_pool: Vec<usize>,
    candidates: MatrixView<'a>,
    guesses: Vec<usize>,
    hints: Vec<Score>,
    candidate_sizes: Vec<usize>,
    guesses_left: usize,
    state: GameState,
}

impl<'a> Solver<'a> {
    /// Start a game over the matrix's universe
    ///
    /// # Errors
    /// Returns an error if the guess budget is zero, or the configured
    /// initial guess has the wrong slot count or is not in the universe.
    pub fn new(matrix: &'a dyn ScoreMatrix, config: SolverConfig) -> Result<Self, NerdleError> {
        if config.max_guesses == 0 {
            return Err(NerdleError::InvalidConfig(
                "max_guesses must be at least 1".to_string(),
            ));
        }

        let opener = match &config.initial_guess {
            Some(code) => {
                if code.len() != matrix.num_slots() {
                    return Err(NerdleError::SlotMismatch {
                        expected: matrix.num_slots(),
                        found: code.len(),
                    });
                }
                matrix
                    .index_of(code)
                    .ok_or_else(|| NerdleError::UnknownCode(code.to_string()))?
            }
            None => default_opener(matrix)?,
        };

        if config.verbose {
            println!("🎯 Opening with {}", matrix.code_at(opener));
        }

        Ok(Self {
            matrix,
            guess_pool: (0..matrix.len()).collect(),
            candidates: matrix.view(),
            guesses: vec![opener],
            hints: Vec::new(),
            candidate_sizes: Vec::new(),
            guesses_left: config.max_guesses,
            state: GameState::Playing,
            config,
        })
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// The guess awaiting a hint, while the game is in progress
    #[must_use]
    pub fn current_guess(&self) -> Option<&'a Code> {
        match self.state {
            GameState::Playing => self.guesses.last().map(|&g| self.matrix.code_at(g)),
            GameState::Solved | GameState::Exhausted => None,
        }
    }

    /// Answers still consistent with every hint
    #[must_use]
    pub const fn candidates(&self) -> &MatrixView<'a> {
        &self.candidates
    }

    /// Guesses that may still be made, including the current one
    #[must_use]
    pub const fn guesses_left(&self) -> usize {
        self.guesses_left
    }

    /// Record the hint for the current guess and pick the next guess
    ///
    /// # Errors
    /// Returns an error if the game is over, the score is malformed for this
    /// slot count, or the score rules out every remaining candidate. The
    /// solver is unchanged when an error is returned.
    pub fn observe(&mut self, score: Score) -> Result<GameState, NerdleError> {
        if self.state != GameState::Playing {
            return Err(NerdleError::GameOver);
        }

        let num_slots = self.matrix.num_slots();
        if !score.is_valid(num_slots) {
            return Err(NerdleError::InvalidHint(format!(
                "{score} is not a {num_slots}-slot score"
            )));
        }

        let guess = *self
            .guesses
            .last()
            .expect("a game in progress always has a current guess");
        let remaining = self.candidates.filter(guess, score);
        if remaining.is_empty() {
            return Err(NerdleError::InconsistentHints);
        }

        if self.config.verbose {
            println!(
                "  {}  {}  → {} candidate{}",
                self.matrix.code_at(guess),
                hint_tiles(score, num_slots),
                remaining.len(),
                if remaining.len() == 1 { "" } else { "s" }
            );
        }

        self.hints.push(score);
        self.candidate_sizes.push(remaining.len());
        self.candidates = remaining;

        if score.is_all_correct(num_slots) {
            self.state = GameState::Solved;
            return Ok(self.state);
        }

        self.guesses_left -= 1;
        if self.guesses_left == 0 {
            self.state = GameState::Exhausted;
            return Ok(self.state);
        }

        let (next, _) = select_best_guess(&self.guess_pool, &self.candidates).ok_or_else(|| {
            NerdleError::InvariantViolation("no guess available".to_string())
        })?;
        self.guesses.push(next);

        Ok(self.state)
    }

    /// Ask `source` for the current guess's hint and observe it
    ///
    /// # Errors
    /// Returns the source's error unchanged, or any error from
    /// [`Solver::observe`].
    pub fn step<H: HintSource + ?Sized>(&mut self, source: &mut H) -> anyhow::Result<GameState> {
        let guess = self.current_guess().ok_or(NerdleError::GameOver)?;
        let score = source.hint(guess)?;
        Ok(self.observe(score)?)
    }

    /// Play until the game is solved or the budget runs out
    ///
    /// # Errors
    /// Returns the first error raised by the source or by [`Solver::observe`].
    pub fn play<H: HintSource + ?Sized>(mut self, source: &mut H) -> anyhow::Result<GameOutcome> {
        while self.state == GameState::Playing {
            self.step(source)?;
        }
        Ok(self.finish())
    }

    /// The outcome of an ended game
    ///
    /// A game still in progress counts as exhausted.
    #[must_use]
    pub fn finish(self) -> GameOutcome {
        match self.state {
            GameState::Solved => GameOutcome::Solved(SolvedGame {
                guesses: self
                    .guesses
                    .iter()
                    .map(|&g| self.matrix.code_at(g).clone())
                    .collect(),
                hints: self.hints,
                candidate_sizes: self.candidate_sizes,
            }),
            GameState::Playing | GameState::Exhausted => GameOutcome::Exhausted,
        }
    }
}

/// The opening guess used when none is configured
///
/// 6-slot universes open with [`DEFAULT_OPENER`]; other universes (or one
/// missing that code) use the minimax-optimal guess over all answers.
///
/// # Errors
/// Returns [`NerdleError::EmptyUniverse`] if the matrix has no codes.
pub fn default_opener(matrix: &dyn ScoreMatrix) -> Result<usize, NerdleError> {
    if matrix.num_slots() == DEFAULT_OPENER.len() {
        let known = Code::new(DEFAULT_OPENER)
            .ok()
            .and_then(|code| matrix.index_of(&code));
        if let Some(index) = known {
            return Ok(index);
        }
    }

    let pool: Vec<usize> = (0..matrix.len()).collect();
    select_best_guess(&pool, &matrix.view())
        .map(|(guess, _)| guess)
        .ok_or(NerdleError::EmptyUniverse(matrix.num_slots()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::InMemoryMatrix;
    use crate::solver::KnownAnswer;

    fn code(text: &str) -> Code {
        Code::new(text).unwrap()
    }

    fn solve(matrix: &InMemoryMatrix, opener: &str, answer: &str) -> SolvedGame {
        let config = SolverConfig::default().with_initial_guess(code(opener));
        let solver = Solver::new(matrix, config).unwrap();
        let outcome = solver.play(&mut KnownAnswer::new(code(answer))).unwrap();
        match outcome {
            GameOutcome::Solved(game) => game,
            GameOutcome::Exhausted => panic!("{answer} not solved from {opener}"),
        }
    }

    #[test]
    fn known_game_lengths() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        assert_eq!(solve(&matrix, "54/9=6", "4*7=28").num_guesses(), 3);
        assert_eq!(solve(&matrix, "54/9=6", "4*3=12").num_guesses(), 4);
        assert_eq!(solve(&matrix, "10-5=5", "4*3=12").num_guesses(), 3);
        assert_eq!(solve(&matrix, "54/9=6", "54/9=6").num_guesses(), 1);
    }

    #[test]
    fn trace_lengths_agree() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let game = solve(&matrix, "54/9=6", "4*3=12");
        assert_eq!(game.hints.len(), game.num_guesses());
        assert_eq!(game.candidate_sizes.len(), game.num_guesses());
        assert!(game.hints.last().unwrap().is_all_correct(6));
        assert_eq!(game.candidate_sizes, [15, 2, 1, 1]);
        assert_eq!(game.answer().text(), "4*3=12");
    }

    #[test]
    fn default_opener_for_six_slots() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let solver = Solver::new(&matrix, SolverConfig::default()).unwrap();
        assert_eq!(solver.current_guess().map(Code::text), Some(DEFAULT_OPENER));
    }

    #[test]
    fn computed_opener_for_other_slot_counts() {
        let matrix = InMemoryMatrix::for_slots(5).unwrap();
        let opener = default_opener(&matrix).unwrap();

        let pool: Vec<usize> = (0..matrix.len()).collect();
        let (best, _) = select_best_guess(&pool, &matrix.view()).unwrap();
        assert_eq!(opener, best);
    }

    #[test]
    fn exhaustion_returns_no_trace() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let config = SolverConfig::new(1).with_initial_guess(code("10-5=5"));
        let solver = Solver::new(&matrix, config).unwrap();

        let outcome = solver.play(&mut KnownAnswer::new(code("54/9=6"))).unwrap();
        assert_eq!(outcome, GameOutcome::Exhausted);
        assert!(!outcome.is_solved());
    }

    #[test]
    fn rejects_bad_configuration() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();

        let zero = SolverConfig::new(0);
        assert!(matches!(
            Solver::new(&matrix, zero),
            Err(NerdleError::InvalidConfig(_))
        ));

        let short = SolverConfig::default().with_initial_guess(code("1+2=3"));
        assert!(matches!(
            Solver::new(&matrix, short),
            Err(NerdleError::SlotMismatch {
                expected: 6,
                found: 5
            })
        ));

        let invalid = SolverConfig::default().with_initial_guess(code("1+1=11"));
        assert!(matches!(
            Solver::new(&matrix, invalid),
            Err(NerdleError::UnknownCode(_))
        ));
    }

    #[test]
    fn observe_rejects_impossible_hints() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let mut solver = Solver::new(&matrix, SolverConfig::default()).unwrap();

        // Every slot Present: no answer is a permutation of "10-5=5"
        let impossible = Score::from_hint_string("??????").unwrap();
        assert_eq!(solver.observe(impossible), Err(NerdleError::InconsistentHints));
        assert_eq!(solver.state(), GameState::Playing);
        assert_eq!(solver.candidates().len(), matrix.len());

        // Bits beyond six slots
        let malformed = Score::new(1 << 14);
        assert!(matches!(
            solver.observe(malformed),
            Err(NerdleError::InvalidHint(_))
        ));
    }

    #[test]
    fn observe_after_solving_is_an_error() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let mut solver = Solver::new(&matrix, SolverConfig::default()).unwrap();

        let solved = Score::all_correct(6);
        assert_eq!(solver.observe(solved), Ok(GameState::Solved));
        assert_eq!(solver.current_guess(), None);
        assert_eq!(solver.observe(solved), Err(NerdleError::GameOver));
    }

    #[test]
    fn step_passes_source_errors_through() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        let mut solver = Solver::new(&matrix, SolverConfig::default()).unwrap();

        let mut failing = |_: &Code| -> anyhow::Result<Score> { anyhow::bail!("no connection") };
        let err = solver.step(&mut failing).unwrap_err();
        assert_eq!(err.to_string(), "no connection");
        assert_eq!(solver.state(), GameState::Playing);
    }

    #[test]
    fn candidate_sizes_shrink_monotonically() {
        let matrix = InMemoryMatrix::for_slots(6).unwrap();
        for answer in matrix.codes().iter().step_by(5) {
            let solver = Solver::new(&matrix, SolverConfig::default()).unwrap();
            let outcome = solver.play(&mut KnownAnswer::new(answer.clone())).unwrap();
            let game = outcome.solved().unwrap();

            let sizes = &game.candidate_sizes;
            assert_eq!(sizes.last(), Some(&1), "{answer}");
            for pair in sizes.windows(2) {
                assert!(pair[1] <= pair[0], "{answer}: {sizes:?}");
                if pair[0] > 1 {
                    assert!(pair[1] < pair[0], "{answer}: {sizes:?}");
                }
            }
        }
    }
}
