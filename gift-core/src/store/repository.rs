use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::{GiftHamperRecord, Invoice, RecentInvoice};

/// Largest number of gift hamper ids accepted by one catalog lookup.
pub const MAX_CATALOG_IDS: usize = 10;

/// Default length of the recent-invoice list.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Read access to sale records, line items and the gift hamper catalog.
///
/// Implementations map upstream field names through
/// [`RecordMapping`](crate::mapping::RecordMapping) so callers only ever see
/// canonical models.
#[async_trait]
pub trait SaleRecordStore: Send + Sync {
    /// Loads a sale header and its line items. Totals are computed; seller,
    /// bank details and terms are left for the caller to attach.
    async fn find_invoice(
        &self,
        invoice_number: &str,
    ) -> Result<Invoice, StoreError>;

    /// Most recent invoices, newest first.
    async fn list_recent_invoices(
        &self,
        limit: usize,
    ) -> Result<Vec<RecentInvoice>, StoreError>;

    async fn find_gift_hamper(
        &self,
        gh_id: &str,
    ) -> Result<GiftHamperRecord, StoreError>;

    /// Looks up several catalog entries, in the order given.
    ///
    /// A failed id does not stop the lookup; it is reported in
    /// [`CatalogLookup::failed`] next to the hampers that did load.
    ///
    /// # Errors
    /// [`StoreError::InvalidRequest`] when more than [`MAX_CATALOG_IDS`] ids
    /// are passed.
    async fn find_gift_hampers(
        &self,
        gh_ids: &[String],
    ) -> Result<CatalogLookup, StoreError> {
        if gh_ids.len() > MAX_CATALOG_IDS {
            return Err(StoreError::InvalidRequest(format!(
                "at most {MAX_CATALOG_IDS} gift hamper ids per lookup, got {}",
                gh_ids.len()
            )));
        }

        let mut lookup = CatalogLookup::default();
        for gh_id in gh_ids {
            match self.find_gift_hamper(gh_id).await {
                Ok(hamper) => lookup.found.push(hamper),
                Err(e) => {
                    warn!(gh_id = gh_id.as_str(), error = %e, "Gift hamper lookup failed");
                    lookup.failed.push((gh_id.clone(), e));
                }
            }
        }
        Ok(lookup)
    }
}

/// Outcome of a bulk catalog lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLookup {
    /// Hampers that loaded, in request order.
    pub found: Vec<GiftHamperRecord>,
    /// Ids that could not be loaded, with the reason.
    pub failed: Vec<(String, StoreError)>,
}

impl CatalogLookup {
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|(id, _)| id.as_str()).collect()
    }
}

/// Splits pasted gift hamper ids on commas and newlines, dropping blanks.
pub fn split_gh_ids(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
