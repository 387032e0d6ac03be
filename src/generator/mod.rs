//! Code universe generation
//!
//! Enumerates every valid Nerdle equation of a given slot count. The
//! sequence is lazy and can be restarted by calling [`all_codes`] again;
//! [`universe`] materializes it in index order.

mod layout;

pub use layout::{Layout, LayoutCodes, digit_range};

use crate::core::equation::EQUALS;
use crate::core::{Code, NerdleError, check_slots};

/// Operator-free identities `X=X` for an odd slot count
///
/// `X` has `num_slots / 2` digits; even slot counts have none.
fn identities(num_slots: usize) -> impl Iterator<Item = Code> {
    let digits = num_slots / 2;
    let (lo, hi) = if num_slots % 2 == 1 && digits > 0 {
        digit_range(digits)
    } else {
        (0, 0)
    };

    (lo..hi).map(|x| {
        let side = x.to_string();
        let mut text = Vec::with_capacity(2 * side.len() + 1);
        text.extend_from_slice(side.as_bytes());
        text.push(EQUALS);
        text.extend_from_slice(side.as_bytes());
        Code::from_symbols(text)
    })
}

/// Lazily enumerate every valid equation with `num_slots` slots
///
/// Codes come out grouped by layout, not sorted, and each appears once.
///
/// # Errors
/// Returns [`NerdleError::UnsupportedSlots`] if `num_slots` is outside
/// `1..=MAX_SLOTS`.
///
/// # Examples
/// ```
/// use nerdle_solver::generator::all_codes;
///
/// let codes: Vec<_> = all_codes(5).unwrap().collect();
/// assert_eq!(codes.len(), 217);
/// assert!(codes.iter().all(|c| c.is_valid_equation()));
/// ```
pub fn all_codes(num_slots: usize) -> Result<impl Iterator<Item = Code>, NerdleError> {
    let num_slots = check_slots(num_slots)?;

    Ok(identities(num_slots).chain(Layout::all(num_slots).into_iter().flat_map(Layout::codes)))
}

/// The sorted, duplicate-free universe of codes for `num_slots`
///
/// A code's position in this list is its index everywhere else in the crate.
///
/// # Errors
/// Returns an error if the slot count is unsupported or no valid equation
/// exists for it (e.g. 4 slots).
///
/// # Examples
/// ```
/// use nerdle_solver::generator::universe;
///
/// let codes = universe(6).unwrap();
/// assert_eq!(codes.len(), 206);
/// assert!(codes.windows(2).all(|w| w[0] < w[1]));
///
/// assert!(universe(4).is_err());
/// ```
pub fn universe(num_slots: usize) -> Result<Vec<Code>, NerdleError> {
    let mut codes: Vec<Code> = all_codes(num_slots)?.collect();
    codes.sort_unstable();
    codes.dedup();

    if codes.is_empty() {
        return Err(NerdleError::EmptyUniverse(num_slots));
    }

    Ok(codes)
}
