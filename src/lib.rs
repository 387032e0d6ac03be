//! Nerdle Solver
//!
//! An adaptive minimax solver for Nerdle-style equation guessing games, with
//! universe generation, precomputed score matrices and whole-universe
//! game-tree analysis.
//!
//! # Quick Start
//!
//! ```rust
//! use nerdle_solver::core::{Code, Score};
//! use nerdle_solver::matrix::InMemoryMatrix;
//! use nerdle_solver::solver::{KnownAnswer, Solver, SolverConfig};
//!
//! // Score a guess
//! let guess = Code::new("10-5=5").unwrap();
//! let answer = Code::new("4*3=12").unwrap();
//! assert_eq!(Score::calculate(&guess, &answer).to_hint_string(6), "?---?-");
//!
//! // Solve a game over every 6-slot equation
//! let matrix = InMemoryMatrix::for_slots(6).unwrap();
//! let solver = Solver::new(&matrix, SolverConfig::default()).unwrap();
//! let outcome = solver.play(&mut KnownAnswer::new(answer)).unwrap();
//! assert_eq!(outcome.solved().map(|game| game.num_guesses()), Some(3));
//! ```

// Core domain types
pub mod core;

// Code universe enumeration
pub mod generator;

// Score tables
pub mod matrix;

// Solving algorithms
pub mod solver;

// Game trees, self-play and sampling
pub mod analysis;

// Terminal output formatting
pub mod output;
