use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::calculate_totals;
use crate::models::LineItem;

/// Footer figures of an invoice, each rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Buyer-side header of a sale record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: String,
    pub billing_address: String,
    /// Buyer GSTIN.
    pub gst: String,
    pub contact_person: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub record_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub name: String,
    pub address: String,
    pub gst: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(default)]
    pub account_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub branch: String,
}

/// A complete proforma invoice as handed to a document renderer.
///
/// `totals` is always derived from `items`; use [`Invoice::recalculate`]
/// after changing the item list directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "invoice")]
    pub header: InvoiceHeader,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
    pub seller: Option<SellerInfo>,
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub payment_terms: Vec<String>,
}

impl Invoice {
    pub fn new(
        header: InvoiceHeader,
        items: Vec<LineItem>,
    ) -> Self {
        let totals = calculate_totals(&items);
        Self {
            header,
            items,
            totals,
            seller: None,
            bank_details: None,
            terms: Vec::new(),
            payment_terms: Vec::new(),
        }
    }

    pub fn recalculate(&mut self) {
        self.totals = calculate_totals(&self.items);
    }
}

/// One row of the "recent invoices" picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentInvoice {
    pub sr_no: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub billing_address: String,
}

/// A gift hamper as stored in the catalog table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftHamperRecord {
    pub gh_id: String,
    pub name: String,
    pub image: Option<String>,
    pub gh_bom: String,
    pub pre_tax_sale_price_without_shipping: Decimal,
}
