use async_trait::async_trait;
use gift_core::mapping::{Fields, RecordMapping};
use gift_core::store::DEFAULT_RECENT_LIMIT;
use gift_core::{
    GiftHamperRecord, Invoice, LineItem, RecentInvoice, SaleRecordStore, StoreConfig, StoreError,
};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error};

/// Sale-table field holding the invoice number used for lookups.
const INVOICE_NUMBER_FIELD: &str = "sales_invoice_number";
/// Catalog field holding the gift hamper id used for lookups.
const GH_ID_FIELD: &str = "gh_id";
/// Sale-table field the recent-invoice list is sorted by.
const INVOICE_DATE_FIELD: &str = "Invoice Date";

/// One page of an Airtable list-records response.
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<AirtableRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(default)]
    fields: Fields,
}

/// Escapes a value for use inside a double-quoted Airtable formula string.
///
/// ```
/// use gift_airtable::escape_formula_value;
///
/// assert_eq!(escape_formula_value(r#"INV "7""#), r#"INV \"7\""#);
/// ```
pub fn escape_formula_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn equals_formula(
    field: &str,
    value: &str,
) -> String {
    format!("{{{field}}}=\"{}\"", escape_formula_value(value))
}

fn linked_to_formula(
    link_field: &str,
    record_id: &str,
) -> String {
    format!(
        "FIND(\"{}\", ARRAYJOIN({{{link_field}}}))",
        escape_formula_value(record_id)
    )
}

/// [`SaleRecordStore`] backed by the Airtable REST API.
///
/// Requests are plain `GET`s with a bearer token. There are no retries;
/// timeouts are the HTTP client's defaults.
pub struct AirtableStore {
    client: Client,
    config: StoreConfig,
    mapping: RecordMapping,
}

impl AirtableStore {
    /// # Errors
    /// [`StoreError::Configuration`] when the base id, token or endpoint is
    /// missing or malformed.
    pub fn new(
        config: StoreConfig,
        mapping: RecordMapping,
    ) -> Result<Self, StoreError> {
        Self::with_client(Client::new(), config, mapping)
    }

    pub fn with_client(
        client: Client,
        config: StoreConfig,
        mapping: RecordMapping,
    ) -> Result<Self, StoreError> {
        if config.base_id.trim().is_empty() {
            return Err(StoreError::Configuration("Airtable base id is not set".to_string()));
        }
        if config.token.trim().is_empty() {
            return Err(StoreError::Configuration("Airtable token is not set".to_string()));
        }
        Url::parse(&config.endpoint).map_err(|e| {
            StoreError::Configuration(format!("invalid endpoint '{}': {e}", config.endpoint))
        })?;

        Ok(Self {
            client,
            config,
            mapping,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn table_url(
        &self,
        table: &str,
    ) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.config.endpoint)
            .map_err(|e| StoreError::Configuration(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::Configuration(format!(
                    "endpoint '{}' cannot carry a path",
                    self.config.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(["v0", self.config.base_id.as_str(), table]);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<RecordPage, StoreError> {
        let url = self.table_url(table)?;
        debug!(%url, ?query, "Fetching Airtable records");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.config.token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send GET request to {}: {}", url, e);
                StoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Airtable request failed");
            return Err(StoreError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RecordPage>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Fetches every page of a query, following Airtable's `offset` token.
    async fn fetch_all(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<AirtableRecord>, StoreError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut page_query = query.to_vec();
            if let Some(token) = offset.take() {
                page_query.push(("offset", token));
            }

            let page = self.fetch_page(table, &page_query).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn fetch_first(
        &self,
        table: &str,
        formula: String,
    ) -> Result<Option<AirtableRecord>, StoreError> {
        let query = [("filterByFormula", formula), ("maxRecords", "1".to_string())];
        let page = self.fetch_page(table, &query).await?;
        Ok(page.records.into_iter().next())
    }
}

#[async_trait]
impl SaleRecordStore for AirtableStore {
    async fn find_invoice(
        &self,
        invoice_number: &str,
    ) -> Result<Invoice, StoreError> {
        let tables = &self.config.tables;

        let sale = self
            .fetch_first(&tables.sale, equals_formula(INVOICE_NUMBER_FIELD, invoice_number))
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("invoice '{invoice_number}'")))?;

        let line_query = [(
            "filterByFormula",
            linked_to_formula(&self.config.link_field, &sale.id),
        )];
        let line_records = self.fetch_all(&tables.line_items, &line_query).await?;
        debug!(count = line_records.len(), sale = sale.id.as_str(), "Fetched line items");

        let items: Vec<LineItem> = line_records
            .iter()
            .map(|record| self.mapping.map_line_item(&record.id, &record.fields))
            .collect();
        let header = self
            .mapping
            .map_invoice_header(&sale.id, &sale.fields, invoice_number);

        Ok(Invoice::new(header, items))
    }

    async fn list_recent_invoices(
        &self,
        limit: usize,
    ) -> Result<Vec<RecentInvoice>, StoreError> {
        let limit = if limit == 0 { DEFAULT_RECENT_LIMIT } else { limit };
        let query = [
            ("maxRecords", limit.to_string()),
            ("sort[0][field]", INVOICE_DATE_FIELD.to_string()),
            ("sort[0][direction]", "desc".to_string()),
        ];

        let page = self.fetch_page(&self.config.tables.sale, &query).await?;

        Ok(page
            .records
            .iter()
            .filter_map(|record| self.mapping.map_recent_invoice(&record.fields))
            .collect())
    }

    async fn find_gift_hamper(
        &self,
        gh_id: &str,
    ) -> Result<GiftHamperRecord, StoreError> {
        let record = self
            .fetch_first(&self.config.tables.gift_hamper, equals_formula(GH_ID_FIELD, gh_id))
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("gift hamper '{gh_id}'")))?;

        Ok(self.mapping.map_gift_hamper(gh_id, &record.fields))
    }
}
