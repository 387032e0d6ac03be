//! Core domain types for Nerdle
//!
//! Codes, hints, packed scores and equation validation. Everything here is
//! pure and independent of the score matrix.

mod code;
pub mod equation;
mod error;
mod score;

pub use code::{Code, CodeError, is_symbol};
pub use error::{NerdleError, check_slots};
pub use score::{Hint, Score};

/// Largest supported slot count: a packed score is a `u16`
pub const MAX_SLOTS: usize = 8;
