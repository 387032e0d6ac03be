//! Equation layouts and the odometer that fills them
//!
//! A layout fixes the digit count of every left-hand operand and of the
//! result. Filling a layout walks every operand value and operator choice
//! and keeps the combinations whose exact value has the right width.

use crate::core::Code;
use crate::core::equation::{EQUALS, Operator, evaluate};
use std::fmt;

/// Digit counts of the operands and the result of one equation shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    operand_digits: Vec<usize>,
    result_digits: usize,
}

impl Layout {
    /// Every layout with at least one operator for `num_slots`
    ///
    /// Left-hand sides span `3..num_slots - 1` slots, leaving at least one
    /// slot for the result. Operators never sit first, last or side by side.
    #[must_use]
    pub fn all(num_slots: usize) -> Vec<Self> {
        let mut layouts = Vec::new();

        for lhs in 3..num_slots.saturating_sub(1) {
            let result_digits = num_slots - lhs - 1;
            for operators in 1..=(lhs - 1) / 2 {
                let mut placement = Vec::with_capacity(operators);
                place_operators(lhs, operators, 1, &mut placement, &mut |positions: &[usize]| {
                    layouts.push(Self::from_positions(lhs, positions, result_digits));
                });
            }
        }

        layouts
    }

    fn from_positions(lhs: usize, positions: &[usize], result_digits: usize) -> Self {
        let mut operand_digits = Vec::with_capacity(positions.len() + 1);
        let mut start = 0;
        for &pos in positions {
            operand_digits.push(pos - start);
            start = pos + 1;
        }
        operand_digits.push(lhs - start);

        Self {
            operand_digits,
            result_digits,
        }
    }

    /// Number of slots a filled layout occupies
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.operand_digits.iter().sum::<usize>() + self.operand_digits.len() + self.result_digits
    }

    /// Lazily enumerate the valid equations of this layout
    #[must_use]
    pub fn codes(self) -> LayoutCodes {
        LayoutCodes::new(self)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &digits) in self.operand_digits.iter().enumerate() {
            if i > 0 {
                write!(f, "o")?;
            }
            write!(f, "{}", "X".repeat(digits))?;
        }
        write!(f, "={}", "X".repeat(self.result_digits))
    }
}

/// Choose `remaining` operator positions in `from..lhs - 1`, none adjacent
fn place_operators(
    lhs: usize,
    remaining: usize,
    from: usize,
    placement: &mut Vec<usize>,
    emit: &mut impl FnMut(&[usize]),
) {
    if remaining == 0 {
        emit(placement);
        return;
    }
    for pos in from..lhs - 1 {
        placement.push(pos);
        place_operators(lhs, remaining - 1, pos + 2, placement, emit);
        placement.pop();
    }
}

/// Value range of a `digits`-wide number without a leading zero
///
/// A single slot admits `0` as well.
#[inline]
#[must_use]
pub const fn digit_range(digits: usize) -> (u64, u64) {
    let hi = 10u64.pow(digits as u32);
    if digits == 1 { (0, hi) } else { (hi / 10, hi) }
}

/// One odometer wheel: a current value in `lo..hi`
#[derive(Debug, Clone, Copy)]
struct Wheel {
    value: u64,
    lo: u64,
    hi: u64,
}

impl Wheel {
    const fn new(lo: u64, hi: u64) -> Self {
        Self { value: lo, lo, hi }
    }

    /// Advance by one; returns true on wrap-around
    fn advance(&mut self) -> bool {
        self.value += 1;
        if self.value == self.hi {
            self.value = self.lo;
            true
        } else {
            false
        }
    }
}

/// Iterator over the valid equations of one [`Layout`]
///
/// Operand wheels range over multi-digit values without a leading zero
/// (a single-digit operand starts at `1`); operator wheels over
/// [`Operator::ALL`].
#[derive(Debug, Clone)]
pub struct LayoutCodes {
    layout: Layout,
    operands: Vec<Wheel>,
    operators: Vec<Wheel>,
    operand_values: Vec<u64>,
    operator_values: Vec<Operator>,
    exhausted: bool,
}

impl LayoutCodes {
    fn new(layout: Layout) -> Self {
        let operands: Vec<Wheel> = layout
            .operand_digits
            .iter()
            .map(|&digits| {
                let hi = 10u64.pow(digits as u32);
                Wheel::new(hi / 10, hi)
            })
            .collect();
        let operators = vec![Wheel::new(0, Operator::ALL.len() as u64); operands.len() - 1];

        Self {
            operand_values: Vec::with_capacity(operands.len()),
            operator_values: Vec::with_capacity(operators.len()),
            layout,
            operands,
            operators,
            exhausted: false,
        }
    }

    /// Step to the next combination; operators spin fastest
    fn advance(&mut self) {
        for wheel in self.operators.iter_mut().rev() {
            if !wheel.advance() {
                return;
            }
        }
        for wheel in self.operands.iter_mut().rev() {
            if !wheel.advance() {
                return;
            }
        }
        self.exhausted = true;
    }

    fn render(&self, result: u64) -> Code {
        let mut text = String::with_capacity(self.layout.num_slots());
        for (i, &value) in self.operand_values.iter().enumerate() {
            if i > 0 {
                text.push(char::from(self.operator_values[i - 1].symbol()));
            }
            text.push_str(&value.to_string());
        }
        text.push(char::from(EQUALS));
        text.push_str(&result.to_string());
        Code::from_symbols(text.into_bytes())
    }
}

impl Iterator for LayoutCodes {
    type Item = Code;

    fn next(&mut self) -> Option<Code> {
        let (lo, hi) = digit_range(self.layout.result_digits);

        while !self.exhausted {
            self.operand_values.clear();
            self.operand_values
                .extend(self.operands.iter().map(|w| w.value));
            self.operator_values.clear();
            self.operator_values
                .extend(self.operators.iter().map(|w| Operator::ALL[w.value as usize]));
            self.advance();

            match evaluate(&self.operand_values, &self.operator_values) {
                Some(result) if (lo..hi).contains(&result) => return Some(self.render(result)),
                _ => {}
            }
        }

        None
    }
}
