//! Plain-text views of invoices, recent-invoice lists and hampers.
//!
//! Every function returns the full text so callers can print it or compare
//! it in tests.

use std::fmt::Write;

use gift_core::format::{format_inr, parse_bom_items, parse_config_items};
use gift_core::{CatalogLookup, GeneratedHamper, GiftHamperRecord, Invoice, RecentInvoice};

const RULE_WIDTH: usize = 96;

fn rule(out: &mut String) {
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

pub fn render_invoice(invoice: &Invoice) -> String {
    let mut out = String::new();
    let header = &invoice.header;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "PROFORMA INVOICE");
    if let Some(seller) = &invoice.seller {
        let _ = writeln!(out, "{}", seller.name);
        let _ = writeln!(out, "{}", seller.address);
        let _ = writeln!(out, "GSTIN: {}", seller.gst);
        if !seller.phone.is_empty() || !seller.email.is_empty() {
            let _ = writeln!(out, "{}  {}", seller.phone, seller.email);
        }
    }
    rule(&mut out);

    let _ = writeln!(out, "Invoice No:   {}", header.invoice_number);
    let _ = writeln!(out, "Invoice Date: {}", or_dash(&header.invoice_date));
    let _ = writeln!(out, "Bill To:      {}", or_dash(&header.billing_address));
    let _ = writeln!(out, "Buyer GSTIN:  {}", or_dash(&header.gst));
    let _ = writeln!(out, "Contact:      {}", or_dash(&header.contact_person));
    if let Some(mobile) = &header.mobile {
        let _ = writeln!(out, "Mobile:       {mobile}");
    }
    if let Some(email) = &header.email {
        let _ = writeln!(out, "Email:        {email}");
    }
    rule(&mut out);

    let _ = writeln!(
        out,
        "{:>3}  {:<36} {:>5} {:>14} {:>5} {:>12} {:>14}",
        "#", "Item", "Qty", "Pre-tax", "GST%", "MRP", "Amount"
    );
    for (index, item) in invoice.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<36} {:>5} {:>14} {:>5} {:>12} {:>14}",
            index + 1,
            item.name,
            item.quantity,
            format_inr(item.pre_tax_price),
            item.gst_percent.normalize(),
            format_inr(item.mrp()),
            format_inr(item.amount()),
        );
        for entry in parse_config_items(&item.config) {
            let _ = writeln!(out, "     - {entry}");
        }
    }
    if invoice.items.is_empty() {
        let _ = writeln!(out, "     (no line items)");
    }
    rule(&mut out);

    let totals = &invoice.totals;
    let _ = writeln!(out, "{:>78} {:>17}", "Taxable Amount", format_inr(totals.taxable_amount));
    let _ = writeln!(out, "{:>78} {:>17}", "GST", format_inr(totals.tax_amount));
    let _ = writeln!(out, "{:>78} {:>17}", "Grand Total", format_inr(totals.grand_total));

    if let Some(bank) = &invoice.bank_details {
        rule(&mut out);
        let _ = writeln!(out, "Bank Details");
        if !bank.account_name.is_empty() {
            let _ = writeln!(out, "  Account Name: {}", bank.account_name);
        }
        let _ = writeln!(out, "  Bank:         {}", bank.bank_name);
        let _ = writeln!(out, "  Account No:   {}", bank.account_number);
        let _ = writeln!(out, "  IFSC:         {}", bank.ifsc);
        let _ = writeln!(out, "  Branch:       {}", bank.branch);
    }

    write_numbered(&mut out, "Payment Terms", &invoice.payment_terms);
    write_numbered(&mut out, "Terms & Conditions", &invoice.terms);

    out
}

fn write_numbered(
    out: &mut String,
    title: &str,
    lines: &[String],
) {
    if lines.is_empty() {
        return;
    }
    rule(out);
    let _ = writeln!(out, "{title}");
    for (index, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "  {}. {line}", index + 1);
    }
}

pub fn render_recent(invoices: &[RecentInvoice]) -> String {
    if invoices.is_empty() {
        return "No recent invoices.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>6}  {:<24} {:<12} {}", "Sr No", "Invoice No", "Date", "Bill To");
    for invoice in invoices {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<12} {}",
            invoice.sr_no,
            or_dash(&invoice.invoice_number),
            or_dash(&invoice.invoice_date),
            or_dash(&invoice.billing_address),
        );
    }
    out
}

/// Result cards of the hamper designer, primary picks first, then backups.
pub fn render_hampers(hampers: &[GeneratedHamper]) -> String {
    let mut out = String::new();

    for hamper in hampers {
        let tag = if hamper.is_backup { "BACKUP" } else { "PICK" };
        let _ = writeln!(out, "[{tag}] {} ({})", hamper.name, hamper.id);
        let _ = writeln!(
            out,
            "  {} per hamper, GST {}%, confidence {}%, {} ({})",
            format_inr(hamper.total_price),
            hamper.gst_percent.normalize(),
            hamper.confidence,
            hamper.feasibility.label(),
            hamper.feasibility,
        );
        if !hamper.badges.is_empty() {
            let badges: Vec<String> = hamper.badges.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "  Badges: {}", badges.join(", "));
        }
        let _ = writeln!(out, "  Hero: {}", hamper.hero_product);
        for item in hamper.items.iter().skip(1) {
            let _ = writeln!(out, "    + {} x{} @ {}", item.name, item.qty, format_inr(item.unit_price));
        }
        for reason in &hamper.why_chosen {
            let _ = writeln!(out, "  * {reason}");
        }
        out.push('\n');
    }

    out
}

pub fn render_gift_hamper(hamper: &GiftHamperRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", hamper.gh_id, or_dash(&hamper.name));
    let _ = writeln!(
        out,
        "  Pre-tax price (ex. shipping): {}",
        format_inr(hamper.pre_tax_sale_price_without_shipping)
    );
    if let Some(image) = &hamper.image {
        let _ = writeln!(out, "  Image: {image}");
    }
    let entries = parse_bom_items(&hamper.gh_bom);
    if entries.is_empty() && !hamper.gh_bom.trim().is_empty() {
        let _ = writeln!(out, "  BOM: {}", hamper.gh_bom.trim());
    }
    for entry in entries {
        let _ = writeln!(out, "    - {entry}");
    }
    out
}

/// Loaded hampers, then one line naming the ids that failed.
pub fn render_catalog(lookup: &CatalogLookup) -> String {
    let mut out = lookup
        .found
        .iter()
        .map(render_gift_hamper)
        .collect::<Vec<_>>()
        .join("\n");
    if !lookup.failed.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "Failed to load: {}", lookup.failed_ids().join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use gift_core::{
        Badge, BankDetails, Feasibility, HamperItem, InvoiceHeader, LineItem, SellerInfo,
        StoreError,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_invoice() -> Invoice {
        let mut hamper = LineItem::new("Festive Joy Hamper", dec!(1450), 10, dec!(18));
        hamper.config = "(1) Artisan Chocolate Box | (2) Honey Jar".to_string();
        let header = InvoiceHeader {
            invoice_number: "LW/24-25/118".to_string(),
            invoice_date: "2024-11-02".to_string(),
            ..Default::default()
        };
        Invoice::new(
            header,
            vec![hamper, LineItem::new("Executive Gift Set", dec!(1100), 5, dec!(12))],
        )
    }

    // =============================================================================
    // invoices
    // =============================================================================

    #[test]
    fn invoice_lists_items_config_and_totals() {
        let text = render_invoice(&sample_invoice());

        assert!(text.contains("Invoice No:   LW/24-25/118"));
        assert!(text.contains("Bill To:      -"));
        assert!(text.contains("Festive Joy Hamper"));
        assert!(text.contains("     - (1) Artisan Chocolate Box"));
        assert!(text.contains("     - (2) Honey Jar"));
        assert!(text.contains("₹1,711.00"));
        assert!(text.contains("₹20,000.00"));
        assert!(text.contains("₹23,270.00"));
    }

    #[test]
    fn invoice_includes_seller_bank_and_terms_when_present() {
        let mut invoice = sample_invoice();
        invoice.seller = Some(SellerInfo {
            name: "Loopify World Private Ltd".to_string(),
            gst: "27AAECL4397C1ZF".to_string(),
            ..Default::default()
        });
        invoice.bank_details = Some(BankDetails {
            bank_name: "ICICI Bank Ltd".to_string(),
            ifsc: "ICIC0000020".to_string(),
            ..Default::default()
        });
        invoice.payment_terms = vec!["50% advance".to_string()];

        let text = render_invoice(&invoice);

        assert!(text.contains("Loopify World Private Ltd"));
        assert!(text.contains("GSTIN: 27AAECL4397C1ZF"));
        assert!(text.contains("IFSC:         ICIC0000020"));
        assert!(text.contains("Payment Terms\n  1. 50% advance"));
        assert!(!text.contains("Terms & Conditions"));
    }

    #[test]
    fn empty_invoice_says_so() {
        let invoice = Invoice::new(InvoiceHeader::default(), Vec::new());

        let text = render_invoice(&invoice);

        assert!(text.contains("(no line items)"));
        assert!(text.contains("₹0.00"));
    }

    // =============================================================================
    // lists and hampers
    // =============================================================================

    #[test]
    fn recent_list_renders_one_row_per_invoice() {
        let invoices = vec![
            RecentInvoice {
                sr_no: "3".to_string(),
                invoice_number: "INV-3".to_string(),
                invoice_date: "2024-11-03".to_string(),
                billing_address: "Powai".to_string(),
            },
            RecentInvoice {
                sr_no: "2".to_string(),
                invoice_number: "INV-2".to_string(),
                ..Default::default()
            },
        ];

        let text = render_recent(&invoices);

        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().contains("INV-3"));
        assert!(text.lines().nth(2).unwrap().ends_with('-'));
    }

    #[test]
    fn empty_recent_list_has_a_message() {
        assert_eq!(render_recent(&[]), "No recent invoices.\n");
    }

    #[test]
    fn hamper_card_shows_hero_sides_and_badges() {
        let hamper = GeneratedHamper {
            id: "gen-0".to_string(),
            name: "Classic Delight Hamper".to_string(),
            hero_product: "Artisan Chocolate Box".to_string(),
            side_items: vec!["Honey Jar".to_string()],
            total_price: dec!(770),
            badges: vec![Badge::FastDelivery, Badge::Premium],
            items: vec![
                HamperItem {
                    name: "Artisan Chocolate Box".to_string(),
                    qty: 1,
                    unit_price: dec!(550),
                },
                HamperItem {
                    name: "Honey Jar".to_string(),
                    qty: 1,
                    unit_price: dec!(220),
                },
            ],
            gst_percent: dec!(12),
            confidence: 88,
            feasibility: Feasibility::Green,
            why_chosen: vec!["Fits the budget comfortably".to_string()],
            is_backup: false,
        };

        let text = render_hampers(&[hamper]);

        assert!(text.starts_with("[PICK] Classic Delight Hamper (gen-0)"));
        assert!(text.contains("₹770.00 per hamper, GST 12%, confidence 88%, Deliverable (green)"));
        assert!(text.contains("Badges: FAST DELIVERY, PREMIUM"));
        assert!(text.contains("    + Honey Jar x1 @ ₹220.00"));
        assert!(text.contains("  * Fits the budget comfortably"));
    }

    #[test]
    fn catalog_entry_splits_bom() {
        let record = GiftHamperRecord {
            gh_id: "GH-001".to_string(),
            name: "Classic Delight Hamper".to_string(),
            image: None,
            gh_bom: "(1) Cookie Tin | (1) Mug".to_string(),
            pre_tax_sale_price_without_shipping: dec!(950),
        };

        let text = render_gift_hamper(&record);

        assert_eq!(
            text,
            "GH-001 Classic Delight Hamper\n  Pre-tax price (ex. shipping): ₹950.00\n    - (1) Cookie Tin\n    - (1) Mug\n"
        );
    }

    #[test]
    fn catalog_entry_splits_comma_separated_bom() {
        let record = GiftHamperRecord {
            gh_id: "GH-002".to_string(),
            name: "Wellness Box".to_string(),
            gh_bom: "(1) Cookie Tin, (1) Mug".to_string(),
            ..Default::default()
        };

        let text = render_gift_hamper(&record);

        assert!(text.ends_with("    - (1) Cookie Tin\n    - (1) Mug\n"));
        assert!(!text.contains("Tin,"));
    }

    #[test]
    fn catalog_entry_lists_plain_bom_items() {
        let record = GiftHamperRecord {
            gh_id: "GH-003".to_string(),
            gh_bom: "Cookie Tin, Mug".to_string(),
            ..Default::default()
        };

        let text = render_gift_hamper(&record);

        assert!(text.contains("    - Cookie Tin\n    - Mug\n"));
        assert!(!text.contains("BOM:"));
    }

    #[test]
    fn catalog_lists_loaded_hampers_then_failed_ids() {
        let lookup = CatalogLookup {
            found: vec![
                GiftHamperRecord { gh_id: "GH-1".to_string(), ..Default::default() },
                GiftHamperRecord { gh_id: "GH-3".to_string(), ..Default::default() },
            ],
            failed: vec![
                ("GH-BAD".to_string(), StoreError::NotFound("GH-BAD".to_string())),
                ("GH-9".to_string(), StoreError::Transport("timeout".to_string())),
            ],
        };

        let text = render_catalog(&lookup);

        assert!(text.starts_with("GH-1 -"));
        assert!(text.contains("\nGH-3 -"));
        assert!(text.ends_with("\nFailed to load: GH-BAD, GH-9\n"));
    }

    #[test]
    fn catalog_with_no_failures_has_no_failure_line() {
        let lookup = CatalogLookup {
            found: vec![GiftHamperRecord { gh_id: "GH-1".to_string(), ..Default::default() }],
            failed: Vec::new(),
        };

        assert!(!render_catalog(&lookup).contains("Failed to load"));
    }
}
