//! Display and input helpers for rupee amounts and hamper configuration text.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes thousands separators and the rupee sign.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
        .collect()
}

/// Parses a user-entered amount.
///
/// Handles `,` as thousands separator and an optional `₹` prefix
/// (e.g. `"₹1,23,456.50"`). Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Like [`parse_decimal`] but returns `None` for blank or unparseable input.
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// Groups an integer digit string the Indian way: last three digits, then
/// pairs (`1234567` -> `12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount without the currency sign: Indian digit grouping, two
/// decimals, half-up rounding.
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::format::format_amount;
///
/// assert_eq!(format_amount(dec!(1234567.891)), "12,34,567.89");
/// assert_eq!(format_amount(dec!(-999.5)), "-999.50");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_half_up(amount);
    rounded.rescale(2);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        group_indian(whole),
        fraction
    )
}

/// Formats an amount for display as rupees, e.g. `₹12,34,567.89`.
pub fn format_inr(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(positive) => format!("-₹{positive}"),
        None => format!("₹{formatted}"),
    }
}

static CONFIG_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\d+\)\s*[^|()]+").unwrap_or_else(|e| panic!("invalid config pattern: {e}"))
});

/// Splits hamper configuration text into its `(<count>) <item>` entries.
///
/// Anything outside such an entry (separators, stray words) is dropped.
pub fn parse_config_items(config: &str) -> Vec<String> {
    CONFIG_ENTRY
        .find_iter(config)
        .map(|m| m.as_str().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Splits a catalog bill of materials into its entries.
///
/// Pipe separated text is read as configuration entries; anything else is
/// split on commas.
pub fn parse_bom_items(bom: &str) -> Vec<String> {
    if bom.contains('|') {
        return parse_config_items(bom);
    }
    bom.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_decimal
    // =========================================================================

    #[test]
    fn parse_decimal_handles_separators_and_symbol() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal(" ₹1,23,456 ").unwrap(), dec!(123456));
    }

    #[test]
    fn parse_decimal_blank_is_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        let err = parse_decimal("12abc").unwrap_err();

        assert!(err.to_string().contains("12abc"));
    }

    #[test]
    fn parse_optional_decimal_returns_none_for_blank_and_garbage() {
        assert_eq!(parse_optional_decimal(""), None);
        assert_eq!(parse_optional_decimal("n/a"), None);
        assert_eq!(parse_optional_decimal("18"), Some(dec!(18)));
    }

    // =========================================================================
    // formatting
    // =========================================================================

    #[test]
    fn small_amounts_are_not_grouped() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(999)), "₹999.00");
    }

    #[test]
    fn thousands_use_a_single_separator() {
        assert_eq!(format_inr(dec!(1000)), "₹1,000.00");
        assert_eq!(format_inr(dec!(23565)), "₹23,565.00");
    }

    #[test]
    fn lakhs_and_crores_are_grouped_in_pairs() {
        assert_eq!(format_inr(dec!(123456)), "₹1,23,456.00");
        assert_eq!(format_inr(dec!(1234567.89)), "₹12,34,567.89");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789.00");
    }

    #[test]
    fn amounts_are_rounded_half_up_to_two_places() {
        assert_eq!(format_inr(dec!(1.005)), "₹1.01");
        assert_eq!(format_inr(dec!(1.004)), "₹1.00");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_inr(dec!(-1500)), "-₹1,500.00");
    }

    // =========================================================================
    // parse_config_items
    // =========================================================================

    #[test]
    fn config_entries_are_split_on_pipes() {
        let entries = parse_config_items("(2) Almond Brittle | (1) Honey Jar|(3) Mug");

        assert_eq!(entries, vec!["(2) Almond Brittle", "(1) Honey Jar", "(3) Mug"]);
    }

    #[test]
    fn config_without_counts_yields_nothing() {
        assert!(parse_config_items("Almond Brittle, Honey Jar").is_empty());
        assert!(parse_config_items("").is_empty());
    }

    #[test]
    fn config_entry_stops_at_parenthesis() {
        let entries = parse_config_items("(1) Cookie Tin (large) (2) Fig Jam");

        assert_eq!(entries, vec!["(1) Cookie Tin", "(2) Fig Jam"]);
    }

    // =========================================================================
    // parse_bom_items
    // =========================================================================

    #[test]
    fn comma_separated_bom_has_no_trailing_commas() {
        let entries = parse_bom_items("(1) Cookie Tin, (1) Mug");

        assert_eq!(entries, vec!["(1) Cookie Tin", "(1) Mug"]);
    }

    #[test]
    fn bom_without_counts_is_split_on_commas() {
        let entries = parse_bom_items("Cookie Tin, Mug,, ");

        assert_eq!(entries, vec!["Cookie Tin", "Mug"]);
    }

    #[test]
    fn pipe_separated_bom_reads_config_entries() {
        let entries = parse_bom_items("(1) Cookie Tin | (1) Mug");

        assert_eq!(entries, vec!["(1) Cookie Tin", "(1) Mug"]);
    }
}
