//! Error types shared by the generator, matrix, solver and analysis layers

use super::code::CodeError;
use std::fmt;

/// Errors raised by the Nerdle core
///
/// Configuration errors and invariant violations are fatal to the caller.
/// Running out of guesses is *not* an error; see
/// [`GameOutcome::Exhausted`](crate::solver::GameOutcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NerdleError {
    /// A code could not be parsed
    Code(CodeError),
    /// Slot count outside the supported range
    UnsupportedSlots(usize),
    /// No valid equation exists for this slot count
    EmptyUniverse(usize),
    /// Two components disagree on the slot count
    SlotMismatch { expected: usize, found: usize },
    /// A code is not part of the universe
    UnknownCode(String),
    /// A hint string or packed score is malformed
    InvalidHint(String),
    /// A tuning parameter is out of range
    InvalidConfig(String),
    /// The observed hints rule out every candidate answer
    InconsistentHints,
    /// The game already ended
    GameOver,
    /// A scoring or generation defect was detected
    InvariantViolation(String),
}

impl fmt::Display for NerdleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(e) => write!(f, "Invalid code: {e}"),
            Self::UnsupportedSlots(n) => write!(
                f,
                "Unsupported slot count {n} (must be 1..={})",
                super::MAX_SLOTS
            ),
            Self::EmptyUniverse(n) => write!(f, "No valid equation has {n} slots"),
            Self::SlotMismatch { expected, found } => {
                write!(f, "Slot count mismatch: expected {expected}, got {found}")
            }
            Self::UnknownCode(code) => write!(f, "Code '{code}' is not in the universe"),
            Self::InvalidHint(msg) => write!(f, "Invalid hint: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::InconsistentHints => {
                write!(f, "Hints are inconsistent: no candidate answer remains")
            }
            Self::GameOver => write!(f, "The game is already over"),
            Self::InvariantViolation(msg) => write!(f, "Invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for NerdleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Code(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodeError> for NerdleError {
    fn from(e: CodeError) -> Self {
        Self::Code(e)
    }
}

/// Check that a slot count is supported
///
/// # Errors
/// Returns [`NerdleError::UnsupportedSlots`] if `num_slots` is 0 or above [`super::MAX_SLOTS`].
pub fn check_slots(num_slots: usize) -> Result<usize, NerdleError> {
    if (1..=super::MAX_SLOTS).contains(&num_slots) {
        Ok(num_slots)
    } else {
        Err(NerdleError::UnsupportedSlots(num_slots))
    }
}
