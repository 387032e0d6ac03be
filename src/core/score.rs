//! Nerdle feedback calculation and bit-packed representation
//!
//! A score packs one 2-bit hint per slot:
//! - 0 = Absent (symbol not in the answer)
//! - 1 = Correct (symbol in the correct slot)
//! - 2 = Present (symbol in the answer, wrong slot)
//!
//! Slot `i` occupies bits `2i` and `2i + 1`, slot 0 in the least-significant
//! position. A `u16` holds up to 8 slots.

use super::{Code, MAX_SLOTS, NerdleError};
use std::fmt;

/// Per-slot feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    /// Nerdle black: not in the answer
    Absent,
    /// Nerdle green: in the correct slot
    Correct,
    /// Nerdle purple: in the answer, but not in this slot
    Present,
}

impl Hint {
    /// The 2-bit encoding of this hint
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Absent => 0,
            Self::Correct => 1,
            Self::Present => 2,
        }
    }

    /// Decode a 2-bit value; `3` is not a hint
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0 => Some(Self::Absent),
            1 => Some(Self::Correct),
            2 => Some(Self::Present),
            _ => None,
        }
    }

    /// Hint-string glyph: `+` correct, `?` present, `-` absent
    #[inline]
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Absent => '-',
            Self::Correct => '+',
            Self::Present => '?',
        }
    }

    /// Parse a hint glyph
    ///
    /// Accepts `+`/🟩 for correct, `?`/🟪 for present and `-`/⬛ for absent.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '+' | '🟩' => Some(Self::Correct),
            '?' | '🟪' => Some(Self::Present),
            '-' | '⬛' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Packed feedback for a whole guess
///
/// The slot count is not stored; callers pass it where it matters, as every
/// component of a run shares a single slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(u16);

impl Score {
    /// Create a score from its raw packed value
    #[inline]
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw packed value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// The solved-state score: every slot Correct
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::Score;
    ///
    /// assert_eq!(Score::all_correct(6).value(), 0b01_01_01_01_01_01);
    /// ```
    #[must_use]
    pub const fn all_correct(num_slots: usize) -> Self {
        let mut value = 0u16;
        let mut slot = 0;
        while slot < num_slots && slot < MAX_SLOTS {
            value |= 1 << (2 * slot);
            slot += 1;
        }
        Self(value)
    }

    /// Check if this is the all-Correct score for `num_slots`
    #[inline]
    #[must_use]
    pub const fn is_all_correct(self, num_slots: usize) -> bool {
        self.0 == Self::all_correct(num_slots).0
    }

    /// Calculate the score when `guess` is played against `answer`
    ///
    /// Implements Nerdle's feedback rules for repeated symbols.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches Correct; collect the unmatched answer symbols
    /// 2. Second pass: walk unmatched guess slots left to right, marking Present
    ///    and consuming one unmatched answer symbol each time
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::{Code, Hint, Score};
    ///
    /// let guess = Code::new("54/9=6").unwrap();
    /// let answer = Code::new("4*7=28").unwrap();
    /// let score = Score::calculate(&guess, &answer);
    ///
    /// assert_eq!(score.to_hint_string(6), "-?--?-");
    /// assert_eq!(score.hint_at(1), Hint::Present);
    /// assert_eq!(score.value(), 520);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Code, answer: &Code) -> Self {
        debug_assert_eq!(guess.len(), answer.len());
        let guess = guess.symbols();
        let answer = answer.symbols();

        let mut value = 0u16;
        // Unmatched answer symbols, indexed by ASCII value ('=' is the largest)
        let mut leftover = [0u8; 64];
        let mut unmatched = [0usize; MAX_SLOTS];
        let mut num_unmatched = 0;

        // First pass: exact matches
        for (slot, (&g, &a)) in guess.iter().zip(answer).enumerate() {
            if g == a {
                value |= Hint::Correct.bits() << (2 * slot);
            } else {
                leftover[usize::from(a)] += 1;
                unmatched[num_unmatched] = slot;
                num_unmatched += 1;
            }
        }

        // Second pass: misplaced symbols, left to right
        for &slot in &unmatched[..num_unmatched] {
            let count = &mut leftover[usize::from(guess[slot])];
            if *count > 0 {
                *count -= 1;
                value |= Hint::Present.bits() << (2 * slot);
            }
        }

        Self(value)
    }

    /// Pack a hint sequence, slot 0 first
    ///
    /// # Panics
    /// Panics in debug mode if more than `MAX_SLOTS` hints are given
    #[must_use]
    pub fn from_hints(hints: &[Hint]) -> Self {
        debug_assert!(hints.len() <= MAX_SLOTS, "At most {MAX_SLOTS} hints");
        Self(
            hints
                .iter()
                .enumerate()
                .fold(0u16, |acc, (slot, hint)| acc | (hint.bits() << (2 * slot))),
        )
    }

    /// Get the hint at a slot
    ///
    /// The invalid pair value `3` reads as Absent; use [`Score::is_valid`] to
    /// reject such scores up front.
    #[inline]
    #[must_use]
    pub fn hint_at(self, slot: usize) -> Hint {
        let bits = (self.0 >> (2 * slot)) & 0b11;
        debug_assert!(bits != 0b11, "Invalid hint bits at slot {slot}");
        Hint::from_bits(bits).unwrap_or(Hint::Absent)
    }

    /// Unpack into one hint per slot
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::{Hint, Score};
    ///
    /// let hints = [Hint::Correct, Hint::Absent, Hint::Present];
    /// let score = Score::from_hints(&hints);
    /// assert_eq!(score.hints(3), hints);
    /// ```
    #[must_use]
    pub fn hints(self, num_slots: usize) -> Vec<Hint> {
        (0..num_slots).map(|slot| self.hint_at(slot)).collect()
    }

    /// Check that every pair is a hint and no bits are set past `num_slots`
    #[must_use]
    pub fn is_valid(self, num_slots: usize) -> bool {
        if num_slots > MAX_SLOTS {
            return false;
        }
        let width = 2 * num_slots;
        if width < 16 && self.0 >> width != 0 {
            return false;
        }
        (0..num_slots).all(|slot| (self.0 >> (2 * slot)) & 0b11 != 0b11)
    }

    /// Count the number of Correct slots
    #[must_use]
    pub fn count_correct(self, num_slots: usize) -> usize {
        (0..num_slots)
            .filter(|&slot| self.hint_at(slot) == Hint::Correct)
            .count()
    }

    /// Count the number of Present slots
    #[must_use]
    pub fn count_present(self, num_slots: usize) -> usize {
        (0..num_slots)
            .filter(|&slot| self.hint_at(slot) == Hint::Present)
            .count()
    }

    /// Render as a hint string such as `"?+-+??"`, slot 0 first
    #[must_use]
    pub fn to_hint_string(self, num_slots: usize) -> String {
        (0..num_slots).map(|slot| self.hint_at(slot).glyph()).collect()
    }

    /// Parse a hint string such as `"?---?-"` or `"🟪⬛⬛⬛🟪⬛"`
    ///
    /// # Errors
    /// Returns `NerdleError::InvalidHint` if the string is empty, longer than
    /// `MAX_SLOTS`, or contains an unknown glyph.
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::Score;
    ///
    /// let score = Score::from_hint_string("?+-+??").unwrap();
    /// assert_eq!(score.to_hint_string(6), "?+-+??");
    /// assert!(Score::from_hint_string("?+x").is_err());
    /// ```
    pub fn from_hint_string(s: &str) -> Result<Self, NerdleError> {
        let hints = s
            .trim()
            .chars()
            .map(|c| {
                Hint::from_glyph(c)
                    .ok_or_else(|| NerdleError::InvalidHint(format!("unknown glyph '{c}' in {s:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if hints.is_empty() || hints.len() > MAX_SLOTS {
            return Err(NerdleError::InvalidHint(format!(
                "expected 1 to {MAX_SLOTS} hints, got {}",
                hints.len()
            )));
        }

        Ok(Self::from_hints(&hints))
    }
}

impl std::str::FromStr for Score {
    type Err = NerdleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hint_string(s)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
