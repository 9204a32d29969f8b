use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{SaleRecordStore, StoreError};
use crate::mapping::RecordMapping;

/// Table names of the sale base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub sale: String,
    pub line_items: String,
    pub gift_hamper: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            sale: "Sale".to_string(),
            line_items: "Sale_LI".to_string(),
            gift_hamper: "Gift Hamper".to_string(),
        }
    }
}

/// Backend-agnostic store configuration, read from the `[store]` section of
/// the config file.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. The remaining fields are interpreted by that factory.
///
/// | backend    | base_id / token                       | endpoint                   |
/// |------------|---------------------------------------|----------------------------|
/// | `airtable` | `appXXXXXXXX` / personal access token | `https://api.airtable.com` |
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"airtable"`).
    pub backend: String,
    pub base_id: String,
    pub token: String,
    pub endpoint: String,
    pub tables: TableNames,
    /// Line-item field linking a row to its sale record.
    pub link_field: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "airtable".to_string(),
            base_id: String::new(),
            token: String::new(),
            endpoint: "https://api.airtable.com".to_string(),
            tables: TableNames::default(),
            link_field: "so".to_string(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("base_id", &self.base_id)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("endpoint", &self.endpoint)
            .field("tables", &self.tables)
            .field("link_field", &self.link_field)
            .finish()
    }
}

/// One implementation per record backend. Each backend crate exports a
/// single unit struct that implements this trait and is registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Validate the configuration and return a ready-to-use store.
    async fn create(
        &self,
        config: &StoreConfig,
        mapping: RecordMapping,
    ) -> Result<Box<dyn SaleRecordStore>, StoreError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any previous factory with the
    /// same name.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] when no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
        mapping: RecordMapping,
    ) -> Result<Box<dyn SaleRecordStore>, StoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config, mapping).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
