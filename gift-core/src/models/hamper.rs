use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::calculate_totals;
use crate::models::{InvoiceTotals, LineItem};

/// How the hamper designer should trade off price, speed and perceived value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityMode {
    #[default]
    Balanced,
    Budget,
    Fast,
    Premium,
}

impl PriorityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Budget => "budget",
            Self::Fast => "fast",
            Self::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "balanced" => Some(Self::Balanced),
            "budget" => Some(Self::Budget),
            "fast" => Some(Self::Fast),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// GST rate applied to hampers generated under this mode.
    pub fn gst_percent(&self) -> Decimal {
        match self {
            Self::Premium => Decimal::from(18),
            _ => Decimal::from(12),
        }
    }
}

/// Traffic-light deliverability label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    Green,
    Yellow,
    Red,
}

impl Feasibility {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "Deliverable",
            Self::Yellow => "Risk",
            Self::Red => "Not Possible",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "LOW STOCK")]
    LowStock,
    #[serde(rename = "FAST DELIVERY")]
    FastDelivery,
    #[serde(rename = "PREMIUM")]
    Premium,
}

impl fmt::Display for Badge {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::LowStock => "LOW STOCK",
            Self::FastDelivery => "FAST DELIVERY",
            Self::Premium => "PREMIUM",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HamperItem {
    pub name: String,
    pub qty: i64,
    pub unit_price: Decimal,
}

/// An unlabelled hamper combination straight out of the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamperCandidate {
    pub hero: HamperItem,
    pub sides: Vec<HamperItem>,
}

impl HamperCandidate {
    /// Hero first, then side items.
    pub fn items(&self) -> Vec<HamperItem> {
        std::iter::once(self.hero.clone())
            .chain(self.sides.iter().cloned())
            .collect()
    }

    pub fn total_price(&self) -> Decimal {
        std::iter::once(&self.hero)
            .chain(self.sides.iter())
            .map(|item| item.unit_price * Decimal::from(item.qty))
            .sum()
    }
}

/// A scored recommendation as shown on the hamper designer's result cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedHamper {
    pub id: String,
    pub name: String,
    pub hero_product: String,
    pub side_items: Vec<String>,
    pub total_price: Decimal,
    pub badges: Vec<Badge>,
    pub items: Vec<HamperItem>,
    pub gst_percent: Decimal,
    pub confidence: u8,
    pub feasibility: Feasibility,
    pub why_chosen: Vec<String>,
    pub is_backup: bool,
}

impl GeneratedHamper {
    /// Prices one hamper with optional per-item quantity overrides, keyed by
    /// item name. Overrides below one are raised to one.
    pub fn quote(
        &self,
        qty_overrides: &HashMap<String, i64>,
    ) -> InvoiceTotals {
        calculate_totals(&self.line_items(qty_overrides))
    }

    /// Converts the hamper contents into invoice line items at the hamper's
    /// GST rate.
    pub fn line_items(
        &self,
        qty_overrides: &HashMap<String, i64>,
    ) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| {
                let qty = qty_overrides
                    .get(&item.name)
                    .copied()
                    .unwrap_or(item.qty)
                    .max(1);
                LineItem::new(item.name.clone(), item.unit_price, qty, self.gst_percent)
            })
            .collect()
    }
}
