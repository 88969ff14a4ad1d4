//! Decimal helpers for ledger amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; rounding happens only at the
//! response boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Amounts whose absolute value is below this are treated as "no effect".
pub const MATERIALITY_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns true if `amount` is at or above the materiality threshold in magnitude.
#[must_use]
pub fn is_material(amount: Decimal) -> bool {
    amount.abs() >= MATERIALITY_THRESHOLD
}

/// Returns true if `a` and `b` differ by less than the materiality threshold.
#[must_use]
pub fn approx_eq(a: Decimal, b: Decimal) -> bool {
    !is_material(a - b)
}

/// Rounds a currency amount to 2 decimal places (half away from zero).
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to 1 decimal place (half away from zero).
#[must_use]
pub fn round_percent(percent: Decimal) -> Decimal {
    percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
