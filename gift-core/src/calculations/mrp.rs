//! MRP (tax-inclusive unit price) derivation.
//!
//! MRP shown on invoices is always derived from the pre-tax price and the
//! GST rate. Some record sources attach their own MRP; that value is kept on
//! the line item for reference only and is never used for amounts, so the
//! per-line "Amount" column always reconciles with the totals footer.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Tolerance above which a supplied MRP is reported as disagreeing with the
/// derived one.
pub const MRP_MISMATCH_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Derives the tax-inclusive unit price: `pre_tax_price * (1 + gst_percent / 100)`.
///
/// The result is not rounded; callers round once at display or aggregate
/// time. Negative inputs are treated as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::derive_mrp;
///
/// assert_eq!(derive_mrp(dec!(500), dec!(12)), dec!(560.00));
/// assert_eq!(derive_mrp(dec!(250), dec!(18)), dec!(295.00));
/// ```
pub fn derive_mrp(
    pre_tax_price: Decimal,
    gst_percent: Decimal,
) -> Decimal {
    let price = non_negative(pre_tax_price);
    let rate = non_negative(gst_percent);

    price + price * rate / ONE_HUNDRED
}

/// Returns the absolute difference between a supplied MRP and the derived
/// one when it exceeds [`MRP_MISMATCH_TOLERANCE`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::mrp_mismatch;
///
/// assert_eq!(mrp_mismatch(dec!(599), dec!(500), dec!(12)), Some(dec!(39)));
/// assert_eq!(mrp_mismatch(dec!(560.004), dec!(500), dec!(12)), None);
/// ```
pub fn mrp_mismatch(
    supplied_mrp: Decimal,
    pre_tax_price: Decimal,
    gst_percent: Decimal,
) -> Option<Decimal> {
    let derived = round_half_up(derive_mrp(pre_tax_price, gst_percent));
    let difference = (round_half_up(supplied_mrp) - derived).abs();

    (difference > MRP_MISMATCH_TOLERANCE).then_some(difference)
}
