//! Invoice totals: taxable amount, GST and grand total.
//!
//! Line values are summed unrounded and each aggregate is rounded once, so
//! `grand_total` is always `round(taxable + tax)` rather than the sum of two
//! already-rounded figures. Negative prices, rates and quantities count as
//! zero; the calculator never fails and holds no state, so it is safe to run
//! after every edit.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gift_core::LineItem;
//! use gift_core::calculations::calculate_totals;
//!
//! let items = vec![LineItem::new("Festive Joy Hamper", dec!(100), 2, dec!(18))];
//! let totals = calculate_totals(&items);
//!
//! assert_eq!(totals.taxable_amount, dec!(200.00));
//! assert_eq!(totals.tax_amount, dec!(36.00));
//! assert_eq!(totals.grand_total, dec!(236.00));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::{InvoiceTotals, LineItem};

/// Computes the invoice footer for an ordered list of line items.
pub fn calculate_totals(items: &[LineItem]) -> InvoiceTotals {
    let (taxable, tax) = items
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(taxable, tax), item| {
            (taxable + item.taxable_value(), tax + item.tax_value())
        });

    InvoiceTotals {
        taxable_amount: round_half_up(taxable),
        tax_amount: round_half_up(tax),
        grand_total: round_half_up(taxable + tax),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn item(
        pre_tax_price: Decimal,
        quantity: i64,
        gst_percent: Decimal,
    ) -> LineItem {
        LineItem::new("Gift Hamper", pre_tax_price, quantity, gst_percent)
    }

    #[test]
    fn empty_list_totals_zero() {
        let totals = calculate_totals(&[]);

        assert_eq!(totals, InvoiceTotals::default());
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn single_item_at_eighteen_percent() {
        let totals = calculate_totals(&[item(dec!(100), 2, dec!(18))]);

        assert_eq!(totals.taxable_amount, dec!(200.00));
        assert_eq!(totals.tax_amount, dec!(36.00));
        assert_eq!(totals.grand_total, dec!(236.00));
    }

    #[test]
    fn zero_price_totals_zero() {
        let totals = calculate_totals(&[item(Decimal::ZERO, 5, dec!(18))]);

        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn mixed_rates_are_summed_per_line() {
        let totals = calculate_totals(&[
            item(dec!(1450), 10, dec!(18)),
            item(dec!(1100), 5, dec!(12)),
            item(dec!(250), 1, dec!(18)),
        ]);

        assert_eq!(totals.taxable_amount, dec!(20250.00));
        assert_eq!(totals.tax_amount, dec!(3315.00));
        assert_eq!(totals.grand_total, dec!(23565.00));
    }

    #[test]
    fn rounding_happens_once_on_the_aggregate() {
        // Each line carries 0.0045 of tax: per-line rounding would give 0.00
        // twice, aggregate rounding gives 0.01.
        let totals = calculate_totals(&[
            item(dec!(0.025), 1, dec!(18)),
            item(dec!(0.025), 1, dec!(18)),
        ]);

        assert_eq!(totals.tax_amount, dec!(0.01));
        assert_eq!(totals.taxable_amount, dec!(0.05));
        assert_eq!(totals.grand_total, dec!(0.06));
    }

    #[test]
    fn grand_total_is_rounded_sum_of_unrounded_parts() {
        let items = [
            item(dec!(333.333), 3, dec!(18)),
            item(dec!(12.345), 7, dec!(12)),
        ];
        let raw_taxable: Decimal = items.iter().map(LineItem::taxable_value).sum();
        let raw_tax: Decimal = items.iter().map(LineItem::tax_value).sum();

        let totals = calculate_totals(&items);

        assert_eq!(totals.grand_total, round_half_up(raw_taxable + raw_tax));
    }

    #[test]
    fn negative_values_are_treated_as_zero() {
        let totals = calculate_totals(&[
            item(dec!(-100), 2, dec!(18)),
            item(dec!(100), -2, dec!(18)),
            item(dec!(100), 1, dec!(-18)),
        ]);

        assert_eq!(totals.taxable_amount, dec!(100.00));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.grand_total, dec!(100.00));
    }

    #[test]
    fn calculation_is_idempotent() {
        let items = vec![item(dec!(480), 3, dec!(12)), item(dec!(680), 1, dec!(18))];

        let first = calculate_totals(&items);
        let second = calculate_totals(&items);

        assert_eq!(first, second);
    }
}
