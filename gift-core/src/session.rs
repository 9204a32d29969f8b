//! Editable invoice state behind the admin password gate.
//!
//! An [`InvoiceSession`] owns one loaded [`Invoice`]. Every mutation
//! snapshots the previous item list into a bounded [`History`] and
//! recomputes totals, so the footer is never stale and [`InvoiceSession::undo`]
//! can step back up to [`HISTORY_CAPACITY`] edits.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::history::{HISTORY_CAPACITY, History};
use crate::models::{Invoice, InvoiceTotals, LineItem};

pub const DEFAULT_SHIPPING_GST_PERCENT: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("item index {index} is out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("invoice session is locked")]
    Locked,
}

/// Field changes for [`InvoiceSession::edit_item`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemEdit {
    pub name: Option<String>,
    pub pre_tax_price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub gst_percent: Option<Decimal>,
    pub config: Option<String>,
}

impl LineItemEdit {
    fn apply(
        self,
        item: &mut LineItem,
    ) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(price) = self.pre_tax_price {
            item.pre_tax_price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(gst) = self.gst_percent {
            item.gst_percent = gst;
        }
        if let Some(config) = self.config {
            item.config = config;
        }
    }
}

/// Input of the "add shipping" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingCharge {
    pub pre_gst_price: Decimal,
    pub gst_percent: Decimal,
    pub quantity: i64,
}

impl ShippingCharge {
    /// One shipping unit at the default 18% GST.
    pub fn new(pre_gst_price: Decimal) -> Self {
        Self {
            pre_gst_price,
            gst_percent: DEFAULT_SHIPPING_GST_PERCENT,
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceSession {
    invoice: Invoice,
    history: History<Vec<LineItem>>,
    admin_password: Option<String>,
    authenticated: bool,
}

impl InvoiceSession {
    /// Opens a session. Without an admin password the session starts
    /// unlocked.
    pub fn new(
        mut invoice: Invoice,
        admin_password: Option<String>,
    ) -> Self {
        invoice.recalculate();
        let authenticated = admin_password.is_none();
        Self {
            invoice,
            history: History::with_capacity(HISTORY_CAPACITY),
            admin_password,
            authenticated,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn into_invoice(self) -> Invoice {
        self.invoice
    }

    pub fn items(&self) -> &[LineItem] {
        &self.invoice.items
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.invoice.totals
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn unlock(
        &mut self,
        password: &str,
    ) -> Result<(), SessionError> {
        match &self.admin_password {
            Some(expected) if expected != password => {
                warn!("Rejected invoice session password");
                Err(SessionError::IncorrectPassword)
            }
            _ => {
                self.authenticated = true;
                info!("Invoice session unlocked");
                Ok(())
            }
        }
    }

    pub fn lock(&mut self) {
        self.authenticated = false;
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(SessionError::Locked)
        }
    }

    fn check_index(
        &self,
        index: usize,
    ) -> Result<(), SessionError> {
        let len = self.invoice.items.len();
        if index < len {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange { index, len })
        }
    }

    fn snapshot(&mut self) {
        self.history.push(self.invoice.items.clone());
    }

    fn commit(&mut self) {
        self.invoice.recalculate();
        debug!(
            items = self.invoice.items.len(),
            grand_total = %self.invoice.totals.grand_total,
            "Invoice totals recalculated"
        );
    }

    pub fn add_item(
        &mut self,
        item: LineItem,
    ) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.snapshot();
        self.invoice.items.push(item);
        self.commit();
        Ok(())
    }

    pub fn edit_item(
        &mut self,
        index: usize,
        edit: LineItemEdit,
    ) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.check_index(index)?;
        self.snapshot();
        edit.apply(&mut self.invoice.items[index]);
        self.commit();
        Ok(())
    }

    pub fn remove_item(
        &mut self,
        index: usize,
    ) -> Result<LineItem, SessionError> {
        self.ensure_unlocked()?;
        self.check_index(index)?;
        self.snapshot();
        let removed = self.invoice.items.remove(index);
        self.commit();
        Ok(removed)
    }

    /// Appends a `Shipping & Handling` row. Quantities below one are
    /// raised to one.
    pub fn add_shipping(
        &mut self,
        charge: ShippingCharge,
    ) -> Result<(), SessionError> {
        let id = format!("shipping-{}", Utc::now().timestamp_millis());
        let item = LineItem::shipping(
            id,
            charge.pre_gst_price,
            charge.gst_percent,
            charge.quantity.max(1),
        );
        self.add_item(item)
    }

    /// Restores the item list as it was before the last mutation.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        let previous = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.invoice.items = previous;
        self.commit();
        Ok(())
    }
}
