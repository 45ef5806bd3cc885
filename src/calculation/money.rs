//! Rounding helpers for reported amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(324_6425, 4)).to_string(), "324.64");
/// assert_eq!(round_money(Decimal::new(1_005, 3)).to_string(), "1.01");
/// assert_eq!(round_money(Decimal::new(160, 0)).to_string(), "160.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Whole amounts keep two fractional digits when serialized.
    rounded.rescale(2);
    rounded
}

/// Returns `part / whole × 100` rounded to two places, or zero when `whole` is zero.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the ratio overflows.
pub fn percentage_of(part: Decimal, whole: Decimal) -> EngineResult<Decimal> {
    if whole.is_zero() {
        return Ok(round_money(Decimal::ZERO));
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or_else(|| EngineError::overflow("percentage"))
}
