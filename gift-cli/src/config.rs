//! `gift-desk` configuration.
//!
//! ## Load order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`gift-desk.toml` unless `--config` says otherwise)
//! 3. Environment variables
//!
//! ```toml
//! [store]
//! backend = "airtable"
//! base_id = "appXXXXXXXXXXXXXX"
//! token = "patXXXXXXXXXXXXXX"
//!
//! [invoice]
//! default_gst_percent = 18
//! admin_password = "change-me"
//! ```

use std::path::{Path, PathBuf};

use gift_core::{BankDetails, Invoice, SellerInfo, StoreConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "gift-desk.toml";

pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TOKEN: &str = "AIRTABLE_TOKEN";
/// Older deployments used this name for the token.
pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// `[invoice]` section: defaults and the fixed parts of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// GST percent for line items that carry none.
    pub default_gst_percent: Decimal,
    /// Password for the invoice editor. No password means no gate.
    pub admin_password: Option<String>,
    pub seller: Option<SellerInfo>,
    pub bank_details: Option<BankDetails>,
    pub terms: Vec<String>,
    pub payment_terms: Vec<String>,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            default_gst_percent: Decimal::from(18),
            admin_password: None,
            seller: None,
            bank_details: None,
            terms: Vec::new(),
            payment_terms: Vec::new(),
        }
    }
}

impl InvoiceSettings {
    /// Copies seller, bank details and terms onto a loaded invoice.
    pub fn decorate(
        &self,
        invoice: &mut Invoice,
    ) {
        invoice.seller = self.seller.clone();
        invoice.bank_details = self.bank_details.clone();
        invoice.terms = self.terms.clone();
        invoice.payment_terms = self.payment_terms.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub invoice: InvoiceSettings,
}

impl DeskConfig {
    /// Loads configuration from file, environment and defaults.
    ///
    /// An explicit `path` must exist. Without one, `gift-desk.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!(path = DEFAULT_CONFIG_PATH, "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies `AIRTABLE_BASE_ID` and `AIRTABLE_TOKEN` (or
    /// `AIRTABLE_API_KEY`) from `lookup`. Blank values are ignored.
    pub fn apply_env_overrides<F>(
        &mut self,
        lookup: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_id) = non_blank(ENV_BASE_ID) {
            debug!(base_id = %base_id, "Overriding Airtable base id from environment");
            self.store.base_id = base_id;
        }

        if let Some(token) = non_blank(ENV_TOKEN).or_else(|| non_blank(ENV_API_KEY)) {
            debug!("Overriding Airtable token from environment");
            self.store.token = token;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let gst = self.invoice.default_gst_percent;
        if gst < Decimal::ZERO || gst > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Invalid(format!(
                "invoice.default_gst_percent must be between 0 and 100, got {gst}"
            )));
        }
        if self.store.backend.trim().is_empty() {
            return Err(ConfigError::Invalid("store.backend must not be empty".to_string()));
        }
        Ok(())
    }
}
