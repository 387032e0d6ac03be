//! Exact evaluation and validation of Nerdle equations
//!
//! Left-hand sides are evaluated with rational arithmetic so that a division
//! whose intermediate result is fractional (`3/2*4`) is still judged exactly.

/// The `=` separator between left- and right-hand side
pub const EQUALS: u8 = b'=';

/// An arithmetic operator allowed on the left-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators, in the order the generator enumerates them
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// The ASCII symbol of this operator
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> u8 {
        match self {
            Self::Add => b'+',
            Self::Sub => b'-',
            Self::Mul => b'*',
            Self::Div => b'/',
        }
    }

    /// Parse an operator from its ASCII symbol
    #[inline]
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'+' => Some(Self::Add),
            b'-' => Some(Self::Sub),
            b'*' => Some(Self::Mul),
            b'/' => Some(Self::Div),
            _ => None,
        }
    }
}

/// Reduced fraction with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    const fn integer(value: i64) -> Self {
        Self { num: value, den: 1 }
    }

    fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let g = gcd(num, den);
        let sign = if den < 0 { -1 } else { 1 };
        Some(Self {
            num: sign * num / g,
            den: sign * den / g,
        })
    }

    fn add(self, other: Self) -> Option<Self> {
        let num = self
            .num
            .checked_mul(other.den)?
            .checked_add(other.num.checked_mul(self.den)?)?;
        Self::new(num, self.den.checked_mul(other.den)?)
    }

    fn mul(self, other: Self) -> Option<Self> {
        Self::new(
            self.num.checked_mul(other.num)?,
            self.den.checked_mul(other.den)?,
        )
    }

    fn div(self, other: Self) -> Option<Self> {
        Self::new(
            self.num.checked_mul(other.den)?,
            self.den.checked_mul(other.num)?,
        )
    }

    const fn neg(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }

    fn as_integer(self) -> Option<i64> {
        (self.den == 1).then_some(self.num)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Evaluate `operands[0] operators[0] operands[1] ...` with standard precedence
///
/// `*` and `/` bind tighter than `+` and `-`; operators of equal precedence
/// associate left to right.
///
/// Returns the value if it is a non-negative integer, `None` otherwise
/// (including division by zero and malformed input).
///
/// # Examples
/// ```
/// use nerdle_solver::core::equation::{evaluate, Operator};
///
/// assert_eq!(evaluate(&[12, 3], &[Operator::Div]), Some(4));
/// assert_eq!(evaluate(&[3, 2, 4], &[Operator::Div, Operator::Mul]), Some(6));
/// assert_eq!(evaluate(&[7, 2], &[Operator::Div]), None);
/// assert_eq!(evaluate(&[1, 5], &[Operator::Sub]), None);
/// ```
#[must_use]
pub fn evaluate(operands: &[u64], operators: &[Operator]) -> Option<u64> {
    if operands.len() != operators.len() + 1 {
        return None;
    }

    let mut total = Fraction::integer(0);
    let mut term = Fraction::integer(i64::try_from(operands[0]).ok()?);

    for (&op, &value) in operators.iter().zip(&operands[1..]) {
        let value = Fraction::integer(i64::try_from(value).ok()?);
        match op {
            Operator::Mul => term = term.mul(value)?,
            Operator::Div => term = term.div(value)?,
            Operator::Add => {
                total = total.add(term)?;
                term = value;
            }
            Operator::Sub => {
                total = total.add(term)?;
                term = value.neg();
            }
        }
    }

    let result = total.add(term)?.as_integer()?;
    u64::try_from(result).ok()
}

/// Parse a decimal integer literal without a leading zero (a lone `0` is allowed)
fn parse_literal(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() || digits.len() > 18 || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return None;
    }
    Some(
        digits
            .iter()
            .fold(0u64, |acc, &d| acc * 10 + u64::from(d - b'0')),
    )
}

/// Split a left-hand side into operands and operators
///
/// Operands must be non-empty digit runs, so operators are never adjacent and
/// never first or last. When operators are present no operand may start with
/// `0`; an operator-free left-hand side follows the literal rule instead.
fn parse_expression(lhs: &[u8]) -> Option<(Vec<u64>, Vec<Operator>)> {
    let mut operands = Vec::new();
    let mut operators = Vec::new();
    let mut start = 0;

    for (i, &b) in lhs.iter().enumerate() {
        if let Some(op) = Operator::from_symbol(b) {
            operands.push(&lhs[start..i]);
            operators.push(op);
            start = i + 1;
        }
    }
    operands.push(&lhs[start..]);

    if !operators.is_empty() && operands.iter().any(|d| d.first() == Some(&b'0')) {
        return None;
    }

    let values = operands
        .into_iter()
        .map(parse_literal)
        .collect::<Option<Vec<_>>>()?;
    Some((values, operators))
}

/// Check whether `text` is a valid Nerdle equation `LHS=RHS`
///
/// # Examples
/// ```
/// use nerdle_solver::core::equation::is_valid_equation;
///
/// assert!(is_valid_equation(b"12+34=46"));
/// assert!(is_valid_equation(b"5-5=0"));
/// assert!(is_valid_equation(b"10=10"));
/// assert!(!is_valid_equation(b"01+2=3"));
/// assert!(!is_valid_equation(b"1+-2=1"));
/// assert!(!is_valid_equation(b"2+2=5"));
/// ```
#[must_use]
pub fn is_valid_equation(text: &[u8]) -> bool {
    let mut sides = text.split(|&b| b == EQUALS);
    let (Some(lhs), Some(rhs), None) = (sides.next(), sides.next(), sides.next()) else {
        return false;
    };

    let Some(expected) = parse_literal(rhs) else {
        return false;
    };
    let Some((operands, operators)) = parse_expression(lhs) else {
        return false;
    };

    evaluate(&operands, &operators) == Some(expected)
}
