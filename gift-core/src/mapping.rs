//! Field-name mapping from loosely structured upstream records.
//!
//! Sale records arrive as JSON field maps whose keys differ between tables
//! and exports (`pre_tax_price` vs `Pre GST Price`, `qty_sold` vs `Qty`).
//! [`RecordMapping`] resolves each [`CanonicalField`] through one ordered
//! alias list instead of per-call fallback chains.
//!
//! A value is *absent* when the key is missing, the value is `null`, a blank
//! string or an empty array. Numeric zero is present.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};
use tracing::warn;

use crate::calculations::mrp_mismatch;
use crate::models::{GiftHamperRecord, InvoiceHeader, LineItem, RecentInvoice};

/// A JSON object of upstream fields, e.g. an Airtable record's `fields`.
pub type Fields = Map<String, Value>;

/// GST percent applied when a line item carries none.
pub const DEFAULT_GST_PERCENT: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    // Line items
    ItemName,
    PreTaxPrice,
    Quantity,
    GstPercent,
    Mrp,
    Config,

    // Sale header
    InvoiceNumber,
    InvoiceDate,
    BillingAddress,
    BuyerGst,
    ContactPerson,
    Mobile,
    Email,
    SerialNumber,

    // Gift hamper catalog
    HamperName,
    HamperImage,
    HamperBom,
    HamperSalePrice,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 18] = [
        Self::ItemName,
        Self::PreTaxPrice,
        Self::Quantity,
        Self::GstPercent,
        Self::Mrp,
        Self::Config,
        Self::InvoiceNumber,
        Self::InvoiceDate,
        Self::BillingAddress,
        Self::BuyerGst,
        Self::ContactPerson,
        Self::Mobile,
        Self::Email,
        Self::SerialNumber,
        Self::HamperName,
        Self::HamperImage,
        Self::HamperBom,
        Self::HamperSalePrice,
    ];

    /// Source field names tried, in order, when no override is configured.
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::ItemName => &["gift_hamper_name", "Gift Hamper Name"],
            Self::PreTaxPrice => &["pre_tax_price", "Pre GST Price"],
            Self::Quantity => &["qty_sold", "Qty"],
            Self::GstPercent => &["gst", "GST"],
            Self::Mrp => &["mrp", "MRP (Selling Price)"],
            Self::Config => &["gh_config", "Gift Hamper Config", "Description"],
            Self::InvoiceNumber => &["sales_invoice_number", "Invoice Number"],
            Self::InvoiceDate => &["Invoice Date", "invoice_date"],
            Self::BillingAddress => &["Billing Address", "billing_address"],
            Self::BuyerGst => &["GST", "gst", "GSTIN"],
            Self::ContactPerson => &["SPOC Details", "spoc_details", "Contact Person"],
            Self::Mobile => &["Mobile", "mobile", "Phone"],
            Self::Email => &["Email", "email"],
            Self::SerialNumber => &["Sr No"],
            Self::HamperName => &["Gift Hamper Name", "gift_hamper_name"],
            Self::HamperImage => &["Image"],
            Self::HamperBom => &["gh_bom"],
            Self::HamperSalePrice => &["pre_tax_sale_price_without_shipping"],
        }
    }
}

/// `true` unless the value is null, a blank string or an empty array.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Renders a present value as text. Arrays (lookup fields) are joined with
/// `", "`; objects have no text form.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_as_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Coerces a value to a decimal: JSON numbers, numeric strings with
/// separators or a rupee sign, and single-item arrays.
pub fn value_as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Decimal::from_str(&cleaned).ok()
            }
        }
        Value::Array(items) if items.len() == 1 => value_as_decimal(&items[0]),
        _ => None,
    }
}

/// Alias table plus the defaults applied when a field is absent.
#[derive(Debug, Clone)]
pub struct RecordMapping {
    aliases: HashMap<CanonicalField, Vec<String>>,
    default_gst_percent: Decimal,
}

impl Default for RecordMapping {
    fn default() -> Self {
        let aliases = CanonicalField::ALL
            .iter()
            .map(|field| {
                let names = field
                    .default_aliases()
                    .iter()
                    .map(|name| name.to_string())
                    .collect();
                (*field, names)
            })
            .collect();

        Self {
            aliases,
            default_gst_percent: DEFAULT_GST_PERCENT,
        }
    }
}

impl RecordMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_gst_percent(
        mut self,
        gst_percent: Decimal,
    ) -> Self {
        self.default_gst_percent = gst_percent;
        self
    }

    /// Replaces the alias list for one field.
    pub fn with_aliases<I, S>(
        mut self,
        field: CanonicalField,
        aliases: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .insert(field, aliases.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_gst_percent(&self) -> Decimal {
        self.default_gst_percent
    }

    pub fn aliases(
        &self,
        field: CanonicalField,
    ) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First present value among the field's aliases.
    pub fn resolve<'a>(
        &self,
        fields: &'a Fields,
        field: CanonicalField,
    ) -> Option<&'a Value> {
        self.aliases(field)
            .iter()
            .filter_map(|alias| fields.get(alias))
            .find(|value| is_present(value))
    }

    pub fn text(
        &self,
        fields: &Fields,
        field: CanonicalField,
    ) -> Option<String> {
        self.resolve(fields, field)
            .and_then(value_as_text)
            .filter(|s| !s.is_empty())
    }

    /// First alias whose value coerces to a decimal. Present but
    /// non-numeric values are skipped with a warning.
    pub fn decimal(
        &self,
        fields: &Fields,
        field: CanonicalField,
    ) -> Option<Decimal> {
        self.aliases(field).iter().find_map(|alias| {
            let value = fields.get(alias).filter(|v| is_present(v))?;
            let parsed = value_as_decimal(value);
            if parsed.is_none() {
                warn!(?field, alias = alias.as_str(), %value, "Ignoring non-numeric value");
            }
            parsed
        })
    }

    /// Maps a line-item record. Missing price is 0, quantity 1 and GST the
    /// configured default. A quantity that rounds below 1 counts as missing.
    pub fn map_line_item(
        &self,
        record_id: &str,
        fields: &Fields,
    ) -> LineItem {
        let pre_tax_price = self
            .decimal(fields, CanonicalField::PreTaxPrice)
            .unwrap_or(Decimal::ZERO);
        let quantity = self
            .decimal(fields, CanonicalField::Quantity)
            .and_then(|q| {
                q.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .filter(|&q| q >= 1)
            .unwrap_or(1);
        let gst_percent = self
            .decimal(fields, CanonicalField::GstPercent)
            .unwrap_or(self.default_gst_percent);
        let supplied_mrp = self.decimal(fields, CanonicalField::Mrp);

        let name = self.text(fields, CanonicalField::ItemName).unwrap_or_default();
        if let Some(difference) =
            supplied_mrp.and_then(|mrp| mrp_mismatch(mrp, pre_tax_price, gst_percent))
        {
            warn!(
                record_id,
                item = name.as_str(),
                %difference,
                "Supplied MRP disagrees with derived MRP; using derived value"
            );
        }

        LineItem {
            id: record_id.to_string(),
            name,
            pre_tax_price,
            quantity,
            gst_percent,
            supplied_mrp,
            config: self.text(fields, CanonicalField::Config).unwrap_or_default(),
        }
    }

    /// Maps a sale header. `requested_number` is used when the record itself
    /// carries no invoice number.
    pub fn map_invoice_header(
        &self,
        record_id: &str,
        fields: &Fields,
        requested_number: &str,
    ) -> InvoiceHeader {
        InvoiceHeader {
            invoice_number: self
                .text(fields, CanonicalField::InvoiceNumber)
                .unwrap_or_else(|| requested_number.to_string()),
            invoice_date: self.text(fields, CanonicalField::InvoiceDate).unwrap_or_default(),
            billing_address: self
                .text(fields, CanonicalField::BillingAddress)
                .unwrap_or_default(),
            gst: self.text(fields, CanonicalField::BuyerGst).unwrap_or_default(),
            contact_person: self
                .text(fields, CanonicalField::ContactPerson)
                .unwrap_or_default(),
            mobile: self.text(fields, CanonicalField::Mobile),
            email: self.text(fields, CanonicalField::Email),
            record_id: Some(record_id.to_string()),
        }
    }

    /// Maps a row of the recent-invoice list. Rows without a serial number
    /// are drafts, and rows without an invoice number cannot be opened;
    /// both yield `None`.
    pub fn map_recent_invoice(
        &self,
        fields: &Fields,
    ) -> Option<RecentInvoice> {
        let sr_no = self.text(fields, CanonicalField::SerialNumber)?;
        let invoice_number = self.text(fields, CanonicalField::InvoiceNumber)?;

        Some(RecentInvoice {
            sr_no,
            invoice_number,
            invoice_date: self.text(fields, CanonicalField::InvoiceDate).unwrap_or_default(),
            billing_address: self
                .text(fields, CanonicalField::BillingAddress)
                .unwrap_or_default(),
        })
    }

    /// Maps a catalog record. The image is the URL of the first attachment.
    pub fn map_gift_hamper(
        &self,
        gh_id: &str,
        fields: &Fields,
    ) -> GiftHamperRecord {
        let image = self
            .resolve(fields, CanonicalField::HamperImage)
            .and_then(first_attachment_url);

        GiftHamperRecord {
            gh_id: gh_id.to_string(),
            name: self.text(fields, CanonicalField::HamperName).unwrap_or_default(),
            image,
            gh_bom: self.text(fields, CanonicalField::HamperBom).unwrap_or_default(),
            pre_tax_sale_price_without_shipping: self
                .decimal(fields, CanonicalField::HamperSalePrice)
                .unwrap_or(Decimal::ZERO),
        }
    }
}

fn first_attachment_url(value: &Value) -> Option<String> {
    match value {
        Value::Array(attachments) => attachments
            .first()
            .and_then(|a| a.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(url) => Some(url.clone()),
        _ => None,
    }
}
