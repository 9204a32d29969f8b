use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, quantity_factor, round_half_up};
use crate::calculations::derive_mrp;

/// Name given to the shipping row appended by [`LineItem::shipping`].
pub const SHIPPING_ITEM_NAME: &str = "Shipping & Handling";

/// A single invoice row: one product or gift hamper at a pre-tax unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Upstream record id, or a generated id for rows added locally.
    pub id: String,
    pub name: String,
    pub pre_tax_price: Decimal,
    pub quantity: i64,
    pub gst_percent: Decimal,

    /// MRP as attached by the record source, if any.
    ///
    /// Kept for reference only; [`LineItem::mrp`] is always derived.
    pub supplied_mrp: Option<Decimal>,

    /// Free-text hamper configuration, e.g. `(2) Almond Brittle | (1) Honey Jar`.
    pub config: String,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        pre_tax_price: Decimal,
        quantity: i64,
        gst_percent: Decimal,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            pre_tax_price,
            quantity,
            gst_percent,
            supplied_mrp: None,
            config: String::new(),
        }
    }

    /// Builds the shipping row added from the invoice editor.
    pub fn shipping(
        id: impl Into<String>,
        pre_gst_price: Decimal,
        gst_percent: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(SHIPPING_ITEM_NAME, pre_gst_price, quantity, gst_percent)
        }
    }

    pub fn with_id(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.id = id.into();
        self
    }

    /// Tax-inclusive unit price rounded for display.
    pub fn mrp(&self) -> Decimal {
        round_half_up(derive_mrp(self.pre_tax_price, self.gst_percent))
    }

    /// Pre-tax line total (`pre_tax_price * quantity`), unrounded.
    pub fn taxable_value(&self) -> Decimal {
        non_negative(self.pre_tax_price) * quantity_factor(self.quantity)
    }

    /// GST on the line, unrounded.
    pub fn tax_value(&self) -> Decimal {
        self.taxable_value() * non_negative(self.gst_percent) / Decimal::ONE_HUNDRED
    }

    /// The "Amount" column of invoice documents: derived MRP times quantity.
    pub fn amount(&self) -> Decimal {
        round_half_up(
            derive_mrp(self.pre_tax_price, self.gst_percent) * quantity_factor(self.quantity),
        )
    }
}
