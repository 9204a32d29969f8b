//! Common utility functions for money calculations.
//!
//! This module provides shared functionality used by the totals calculator,
//! MRP derivation and hamper quotes, including rounding and the clamping
//! applied to malformed upstream values.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard currency rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a money or percentage value at zero.
///
/// Upstream records occasionally carry negative prices or rates; every
/// calculation in this crate treats those as zero instead of failing.
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-5)), dec!(0));
/// assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Converts a quantity to a decimal multiplier, clamping negatives at zero.
pub fn quantity_factor(quantity: i64) -> Decimal {
    Decimal::from(quantity.max(0))
}
