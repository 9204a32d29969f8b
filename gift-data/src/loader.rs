//! CSV loader for invoice line items.
//!
//! Rows are read as loose field maps and run through the same
//! [`RecordMapping`] the record store uses, so any header spelling the store
//! understands works here too. Header names are case-sensitive.
//!
//! | Column (any alias)                       | Required | Default            |
//! |------------------------------------------|----------|--------------------|
//! | `gift_hamper_name` / `Gift Hamper Name`  | no       | empty              |
//! | `pre_tax_price` / `Pre GST Price`        | yes      | `0` when blank     |
//! | `qty_sold` / `Qty`                       | no       | `1`                |
//! | `gst` / `GST`                            | no       | mapping default    |
//! | `mrp` / `MRP (Selling Price)`            | no       | derived            |
//! | `gh_config` / `Gift Hamper Config` / ... | no       | empty              |
//! | `id`                                     | no       | `row-<n>`          |
//!
//! ```csv
//! gift_hamper_name,pre_tax_price,qty_sold,gst
//! Festive Joy Hamper,"1,450",10,18
//! ```

use std::io::Read;

use gift_core::LineItem;
use gift_core::mapping::{CanonicalField, Fields, RecordMapping};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const ID_COLUMN: &str = "id";

/// Errors that can occur when loading line items.
#[derive(Debug, Error)]
pub enum LineItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no column for {field}; expected one of {aliases:?}")]
    MissingColumn {
        field: &'static str,
        aliases: Vec<String>,
    },
}

impl From<csv::Error> for LineItemLoaderError {
    fn from(err: csv::Error) -> Self {
        LineItemLoaderError::CsvParse(err.to_string())
    }
}

/// Loader for line items from CSV exports of the sale base.
pub struct LineItemLoader;

impl LineItemLoader {
    /// Parse line items from a CSV reader with a header row.
    ///
    /// Blank cells are treated as absent so the mapping defaults apply.
    pub fn parse<R: Read>(
        reader: R,
        mapping: &RecordMapping,
    ) -> Result<Vec<LineItem>, LineItemLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let price_aliases = mapping.aliases(CanonicalField::PreTaxPrice);
        if !headers.iter().any(|h| price_aliases.iter().any(|a| a == h)) {
            return Err(LineItemLoaderError::MissingColumn {
                field: "pre-tax price",
                aliases: price_aliases.to_vec(),
            });
        }

        let mut items = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;

            let mut fields = Fields::new();
            for (header, cell) in headers.iter().zip(record.iter()) {
                let cell = cell.trim();
                if !cell.is_empty() {
                    fields.insert(header.to_string(), Value::String(cell.to_string()));
                }
            }

            let id = fields
                .get(ID_COLUMN)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("row-{}", index + 1));

            items.push(mapping.map_line_item(&id, &fields));
        }

        debug!(count = items.len(), "Parsed line items from CSV");
        Ok(items)
    }
}
