//! Self-play evaluation
//!
//! Runs the solver against every answer of a universe (or the first few) and
//! collects guess statistics.

use super::depth::DepthDistribution;
use crate::core::Code;
use crate::matrix::ScoreMatrix;
use crate::output::formatters::progress_bar;
use crate::solver::{GameOutcome, KnownAnswer, Solver, SolverConfig, default_opener};
use anyhow::Result;
use std::time::{Duration, Instant};

/// Games needing at least this many guesses are listed as hardest
const HARD_GAME: usize = 5;

/// Options for [`run_self_play`]
#[derive(Debug, Clone, Default)]
pub struct SelfPlayConfig {
    pub solver: SolverConfig,

    /// Play only the first `limit` answers
    pub limit: Option<usize>,

    pub show_progress: bool,
}

/// Result of playing a single answer
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub answer: Code,
    /// Guess count when solved
    pub num_guesses: Option<usize>,
    pub duration: Duration,
}

/// Statistics over all games played
#[derive(Debug, Clone)]
pub struct SelfPlayStatistics {
    pub total_games: usize,
    pub solved: usize,
    pub failed: usize,
    pub distribution: DepthDistribution,
    pub total_time: Duration,
    pub opener: Code,
    pub best_game: Option<(Code, usize)>,
    pub hardest_games: Vec<(Code, usize)>,
    pub failures: Vec<Code>,
}

impl SelfPlayStatistics {
    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        self.distribution.average()
    }

    #[must_use]
    pub fn max_guesses(&self) -> usize {
        self.distribution.max_guesses().unwrap_or(0)
    }

    #[must_use]
    pub fn min_guesses(&self) -> usize {
        self.distribution.counts().keys().next().copied().unwrap_or(0)
    }

    fn from_records(records: &[GameRecord], opener: Code, total_time: Duration) -> Self {
        let mut distribution = DepthDistribution::default();
        let mut failures = Vec::new();
        for record in records {
            match record.num_guesses {
                Some(guesses) => distribution.record(guesses),
                None => failures.push(record.answer.clone()),
            }
        }

        let solved_games = || {
            records
                .iter()
                .filter_map(|r| r.num_guesses.map(|n| (r.answer.clone(), n)))
        };
        let best_game = solved_games().min_by_key(|(_, n)| *n);
        let mut hardest_games: Vec<(Code, usize)> =
            solved_games().filter(|(_, n)| *n >= HARD_GAME).collect();
        hardest_games.sort_by_key(|(_, n)| std::cmp::Reverse(*n));
        hardest_games.truncate(10);

        Self {
            total_games: records.len(),
            solved: distribution.total(),
            failed: failures.len(),
            distribution,
            total_time,
            opener,
            best_game,
            hardest_games,
            failures,
        }
    }
}

/// Play every answer of `matrix` with the solver
///
/// Without a configured opener the default one is computed once and reused
/// for every game.
///
/// # Errors
/// Returns an error if the solver configuration is invalid or a game fails
/// with an inconsistent hint.
pub fn run_self_play(matrix: &dyn ScoreMatrix, config: &SelfPlayConfig) -> Result<SelfPlayStatistics> {
    let mut solver_config = config.solver.clone();
    let opener = match &solver_config.initial_guess {
        Some(code) => code.clone(),
        None => matrix.code_at(default_opener(matrix)?).clone(),
    };
    solver_config.initial_guess = Some(opener.clone());

    let total = config.limit.unwrap_or(matrix.len()).min(matrix.len());
    let pb = config.show_progress.then(|| progress_bar(total as u64));

    let mut records = Vec::with_capacity(total);
    let mut guess_sum = 0;
    let total_start = Instant::now();

    for answer in matrix.codes().iter().take(total) {
        let game_start = Instant::now();
        let solver = Solver::new(matrix, solver_config.clone())?;
        let num_guesses = match solver.play(&mut KnownAnswer::new(answer.clone()))? {
            GameOutcome::Solved(game) => Some(game.num_guesses()),
            GameOutcome::Exhausted => None,
        };
        guess_sum += num_guesses.unwrap_or(0);

        records.push(GameRecord {
            answer: answer.clone(),
            num_guesses,
            duration: game_start.elapsed(),
        });

        if let Some(pb) = &pb {
            if records.len() % 10 == 0 {
                pb.set_message(format!("Avg: {:.2}", guess_sum as f64 / records.len() as f64));
            }
            pb.inc(1);
        }
    }

    if let Some(pb) = &pb {
        pb.finish_with_message("Complete!");
    }

    Ok(SelfPlayStatistics::from_records(
        &records,
        opener,
        total_start.elapsed(),
    ))
}
