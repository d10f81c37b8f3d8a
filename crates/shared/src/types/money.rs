//! Money helpers with decimal precision and tolerance bands.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`; these helpers pin down the
//! rounding rules and the tolerance windows shared by all components.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places money is rounded to.
pub const MONEY_SCALE: u32 = 2;

/// Magnitude below which a balance counts as settled (0.01).
pub const SETTLED_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Allowed gap between a transaction amount and the sum of its split (0.02).
pub const SPLIT_TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Rounds to cents, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors to cents (toward negative infinity).
#[must_use]
pub fn floor_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToNegativeInfinity)
}

/// Returns true if the magnitude is strictly below [`SETTLED_TOLERANCE`].
#[must_use]
pub fn is_settled(amount: Decimal) -> bool {
    amount.abs() < SETTLED_TOLERANCE
}

/// Snaps settled amounts to exactly zero.
#[must_use]
pub fn snap_settled(amount: Decimal) -> Decimal {
    if is_settled(amount) { Decimal::ZERO } else { amount }
}

/// Returns true if `actual` is within [`SPLIT_TOLERANCE`] of `expected`.
#[must_use]
pub fn within_split_tolerance(expected: Decimal, actual: Decimal) -> bool {
    (expected - actual).abs() <= SPLIT_TOLERANCE
}

/// Largest transaction or split amount accepted at the boundary
/// (1,000,000,000,000).
///
/// Keeps every sum over a request far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Returns true if the amount has no digits below one cent.
#[must_use]
pub fn is_cent_precise(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}
