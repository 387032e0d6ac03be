//! Nerdle solving
//!
//! The adaptive minimax [`Solver`] plays one game against a [`HintSource`].

mod engine;
mod hints;
pub mod minimax;

pub use engine::{
    DEFAULT_OPENER, GameOutcome, GameState, SolvedGame, Solver, SolverConfig, default_opener,
};
pub use hints::{HintSource, KnownAnswer, ReplayHints};
