//! Nerdle code representation
//!
//! A Code is a fixed-length equation string over digits, `+ - * /` and `=`.
//! Codes double as guesses and answers.

use super::{MAX_SLOTS, equation};
use std::fmt;

/// A Nerdle equation string such as `"12+34=46"`
///
/// Ordering is byte-lexicographic, which is the order the universe is sorted
/// in and therefore defines code indices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    text: String,
}

/// Error type for malformed codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    InvalidLength(usize),
    InvalidSymbol(char),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Code must have 1 to {MAX_SLOTS} slots, got {len}")
            }
            Self::InvalidSymbol(ch) => {
                write!(f, "Code contains '{ch}', expected digits, + - * / or =")
            }
        }
    }
}

impl std::error::Error for CodeError {}

/// Whether `symbol` belongs to the Nerdle alphabet
#[inline]
#[must_use]
pub const fn is_symbol(symbol: u8) -> bool {
    matches!(symbol, b'0'..=b'9' | b'+' | b'-' | b'*' | b'/' | b'=')
}

impl Code {
    /// Create a new Code from a string
    ///
    /// Only the alphabet and length are checked here; whether the code is a
    /// well-formed equation is answered by [`Code::is_valid_equation`].
    ///
    /// # Errors
    /// Returns `CodeError` if:
    /// - Length is 0 or above `MAX_SLOTS`
    /// - A character is outside the Nerdle alphabet
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::Code;
    ///
    /// let code = Code::new("4*3=12").unwrap();
    /// assert_eq!(code.text(), "4*3=12");
    /// assert_eq!(code.len(), 6);
    ///
    /// assert!(Code::new("4x3=12").is_err());
    /// assert!(Code::new("123456789=0").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, CodeError> {
        let text: String = text.into();

        if let Some(ch) = text.chars().find(|&c| !c.is_ascii() || !is_symbol(c as u8)) {
            return Err(CodeError::InvalidSymbol(ch));
        }

        if text.is_empty() || text.len() > MAX_SLOTS {
            return Err(CodeError::InvalidLength(text.len()));
        }

        Ok(Self { text })
    }

    /// Build a code from bytes already known to be in the alphabet
    pub(crate) fn from_symbols(symbols: Vec<u8>) -> Self {
        debug_assert!(symbols.iter().all(|&b| is_symbol(b)));
        debug_assert!(!symbols.is_empty() && symbols.len() <= MAX_SLOTS);
        let text = String::from_utf8(symbols).expect("alphabet is ASCII");
        Self { text }
    }

    /// Get the code as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the code as bytes, one per slot
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a constructed code
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the symbol at a specific slot
    ///
    /// # Panics
    /// Panics if `slot >= self.len()`
    #[inline]
    #[must_use]
    pub fn symbol_at(&self, slot: usize) -> u8 {
        self.symbols()[slot]
    }

    /// Check the equation syntax and arithmetic
    ///
    /// # Examples
    /// ```
    /// use nerdle_solver::core::Code;
    ///
    /// assert!(Code::new("4*3=12").unwrap().is_valid_equation());
    /// assert!(!Code::new("4*3=13").unwrap().is_valid_equation());
    /// ```
    #[must_use]
    pub fn is_valid_equation(&self) -> bool {
        equation::is_valid_equation(self.symbols())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_creation_valid() {
        let code = Code::new("12+34=46").unwrap();
        assert_eq!(code.text(), "12+34=46");
        assert_eq!(code.symbols(), b"12+34=46");
        assert_eq!(code.len(), 8);
        assert!(!code.is_empty());
    }

    #[test]
    fn code_creation_invalid_length() {
        assert!(matches!(Code::new(""), Err(CodeError::InvalidLength(0))));
        assert!(matches!(
            Code::new("1+2+3+4=10"),
            Err(CodeError::InvalidLength(10))
        ));
    }

    #[test]
    fn code_creation_invalid_symbols() {
        assert_eq!(Code::new("1 2=3"), Err(CodeError::InvalidSymbol(' ')));
        assert_eq!(Code::new("a+b=c"), Err(CodeError::InvalidSymbol('a')));
        assert_eq!(Code::new("1÷1=1"), Err(CodeError::InvalidSymbol('÷')));
    }

    #[test]
    fn code_symbol_at() {
        let code = Code::new("4*3=12").unwrap();
        assert_eq!(code.symbol_at(0), b'4');
        assert_eq!(code.symbol_at(1), b'*');
        assert_eq!(code.symbol_at(3), b'=');
        assert_eq!(code.symbol_at(5), b'2');
    }

    #[test]
    fn code_ordering_is_bytewise() {
        // '*' < '+' < '-' < '/' < digits < '='
        let mut codes: Vec<Code> = ["9-3=6", "1+2=3", "1*3=3", "10=10"]
            .iter()
            .map(|s| Code::new(*s).unwrap())
            .collect();
        codes.sort();
        let texts: Vec<&str> = codes.iter().map(Code::text).collect();
        assert_eq!(texts, ["1*3=3", "1+2=3", "10=10", "9-3=6"]);
    }

    #[test]
    fn code_validity_is_separate_from_parsing() {
        let code = Code::new("1+1=3").unwrap();
        assert!(!code.is_valid_equation());
    }

    #[test]
    fn code_display_and_from_str() {
        let code: Code = "54/9=6".parse().unwrap();
        assert_eq!(format!("{code}"), "54/9=6");
    }
}
