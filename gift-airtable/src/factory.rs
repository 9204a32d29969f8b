use async_trait::async_trait;
use gift_core::mapping::RecordMapping;
use gift_core::store::{SaleRecordStore, StoreConfig, StoreError, StoreFactory};
use tracing::info;

use crate::repository::AirtableStore;

/// [`StoreFactory`] for Airtable.
///
/// Register this with a [`gift_core::store::StoreRegistry`] to make the
/// `"airtable"` backend available:
///
/// ```rust,no_run
/// use gift_core::store::StoreRegistry;
/// use gift_airtable::AirtableStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(AirtableStoreFactory));
/// ```
pub struct AirtableStoreFactory;

#[async_trait]
impl StoreFactory for AirtableStoreFactory {
    fn backend_name(&self) -> &'static str {
        "airtable"
    }

    /// Builds an [`AirtableStore`] for `config.base_id`. No request is made
    /// until the first lookup.
    async fn create(
        &self,
        config: &StoreConfig,
        mapping: RecordMapping,
    ) -> Result<Box<dyn SaleRecordStore>, StoreError> {
        let store = AirtableStore::new(config.clone(), mapping)?;
        info!(base = config.base_id.as_str(), endpoint = config.endpoint.as_str(), "Airtable store ready");
        Ok(Box::new(store))
    }
}
