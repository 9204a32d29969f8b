//! Operations behind the `gift-desk` subcommands.

use anyhow::{Context, Result};
use gift_airtable::AirtableStoreFactory;
use gift_core::calculations::generate_hampers;
use gift_core::store::{MAX_CATALOG_IDS, split_gh_ids};
use gift_core::{
    CatalogLookup, GeneratedHamper, Invoice, InvoiceSession, Questionnaire, RecentInvoice,
    RecordMapping, SaleRecordStore, ShippingCharge, StoreRegistry,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{DeskConfig, InvoiceSettings};

/// Registry with every store backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(AirtableStoreFactory));
    registry
}

/// Opens the configured store with a mapping that uses the configured
/// default GST rate.
pub async fn open_store(config: &DeskConfig) -> Result<Box<dyn SaleRecordStore>> {
    let mapping = RecordMapping::new().with_default_gst_percent(config.invoice.default_gst_percent);
    debug!(backend = config.store.backend.as_str(), "Opening record store");

    build_registry()
        .create(&config.store, mapping)
        .await
        .with_context(|| format!("Failed to open '{}' store", config.store.backend))
}

/// Loads an invoice and attaches the configured seller, bank details and
/// terms.
pub async fn load_invoice(
    store: &dyn SaleRecordStore,
    invoice_number: &str,
    settings: &InvoiceSettings,
) -> Result<Invoice> {
    let mut invoice = store
        .find_invoice(invoice_number)
        .await
        .with_context(|| format!("Failed to load invoice {invoice_number}"))?;
    settings.decorate(&mut invoice);

    info!(
        invoice = invoice_number,
        items = invoice.items.len(),
        grand_total = %invoice.totals.grand_total,
        "Loaded invoice"
    );
    Ok(invoice)
}

/// Wraps an invoice in an edit session, unlocking it with `password` when
/// one is given.
pub fn open_session(
    invoice: Invoice,
    settings: &InvoiceSettings,
    password: Option<&str>,
) -> Result<InvoiceSession> {
    let mut session = InvoiceSession::new(invoice, settings.admin_password.clone());
    if let Some(password) = password {
        session.unlock(password).context("Cannot unlock invoice")?;
    }
    Ok(session)
}

/// Appends a shipping row. The session must already be unlocked.
pub fn apply_shipping(
    session: &mut InvoiceSession,
    charge: ShippingCharge,
) -> Result<()> {
    session
        .add_shipping(charge)
        .context("Cannot add shipping; pass --password to unlock the invoice")?;
    Ok(())
}

pub async fn recent_invoices(
    store: &dyn SaleRecordStore,
    limit: usize,
) -> Result<Vec<RecentInvoice>> {
    store
        .list_recent_invoices(limit)
        .await
        .context("Failed to list recent invoices")
}

/// Splits every argument on commas and newlines so pasted lists work.
pub fn collect_gh_ids(args: &[String]) -> Vec<String> {
    args.iter().map(String::as_str).flat_map(split_gh_ids).collect()
}

/// Looks up catalog entries. Ids that fail are returned alongside the
/// hampers that loaded.
pub async fn lookup_catalog(
    store: &dyn SaleRecordStore,
    gh_ids: &[String],
) -> Result<CatalogLookup> {
    anyhow::ensure!(!gh_ids.is_empty(), "no gift hamper ids given");
    anyhow::ensure!(
        gh_ids.len() <= MAX_CATALOG_IDS,
        "at most {MAX_CATALOG_IDS} gift hamper ids can be looked up at once, got {}",
        gh_ids.len()
    );
    store
        .find_gift_hampers(gh_ids)
        .await
        .context("Failed to look up gift hampers")
}

/// Validates the questionnaire and runs the hamper designer.
///
/// A fixed `seed` makes names, confidences and reasons reproducible.
pub fn design_hampers(
    questionnaire: &Questionnaire,
    seed: Option<u64>,
) -> Result<Vec<GeneratedHamper>> {
    if let Err(errors) = questionnaire.validate() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid questionnaire: {}", messages.join("; "));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let hampers = generate_hampers(questionnaire, &mut rng);
    info!(
        client = questionnaire.client_name.as_str(),
        count = hampers.len(),
        "Designed hampers"
    );
    Ok(hampers)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use gift_core::{InvoiceHeader, LineItem, SessionError};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn invoice() -> Invoice {
        Invoice::new(
            InvoiceHeader::default(),
            vec![LineItem::new("Festive Joy Hamper", dec!(1450), 10, dec!(18))],
        )
    }

    fn questionnaire() -> Questionnaire {
        Questionnaire {
            client_name: "Acme Corp".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 12, 1),
            budget: dec!(1500),
            ..Default::default()
        }
    }

    #[test]
    fn registry_knows_airtable() {
        assert_eq!(build_registry().available_backends(), vec!["airtable"]);
    }

    #[tokio::test]
    async fn open_store_reports_missing_credentials() {
        let result = open_store(&DeskConfig::default()).await;

        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Failed to open 'airtable' store"));
    }

    #[tokio::test]
    async fn open_store_rejects_unknown_backend() {
        let mut config = DeskConfig::default();
        config.store.backend = "sheets".to_string();

        let result = open_store(&config).await;

        assert!(format!("{:#}", result.err().unwrap()).contains("unknown backend 'sheets'"));
    }

    #[test]
    fn session_without_password_is_open() {
        let mut session = open_session(invoice(), &InvoiceSettings::default(), None).unwrap();

        apply_shipping(&mut session, ShippingCharge::new(dec!(250))).unwrap();

        assert_eq!(session.items().len(), 2);
        assert_eq!(session.totals().taxable_amount, dec!(14750.00));
    }

    #[test]
    fn guarded_session_needs_the_right_password() {
        let settings = InvoiceSettings {
            admin_password: Some("s3cret".to_string()),
            ..Default::default()
        };

        let wrong = open_session(invoice(), &settings, Some("guess"));
        let mut locked = open_session(invoice(), &settings, None).unwrap();
        let unlocked = open_session(invoice(), &settings, Some("s3cret")).unwrap();

        assert_eq!(
            wrong.err().unwrap().downcast_ref::<SessionError>(),
            Some(&SessionError::IncorrectPassword)
        );
        assert!(apply_shipping(&mut locked, ShippingCharge::new(dec!(250))).is_err());
        assert!(unlocked.is_authenticated());
    }

    #[test]
    fn pasted_id_lists_are_flattened() {
        let args = vec!["GH-001, GH-002".to_string(), "GH-003\nGH-004,".to_string()];

        let ids = collect_gh_ids(&args);

        assert_eq!(ids, vec!["GH-001", "GH-002", "GH-003", "GH-004"]);
    }

    #[test]
    fn design_rejects_invalid_questionnaire() {
        let result = design_hampers(&Questionnaire::default(), Some(1));

        let message = result.err().unwrap().to_string();
        assert!(message.contains("client name is required"));
        assert!(message.contains("delivery date is required"));
    }

    #[test]
    fn seeded_design_is_reproducible() {
        let first = design_hampers(&questionnaire(), Some(42)).unwrap();
        let second = design_hampers(&questionnaire(), Some(42)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }
}
