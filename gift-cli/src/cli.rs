use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gift_core::format::parse_decimal;
use gift_core::store::DEFAULT_RECENT_LIMIT;
use gift_core::{BudgetMode, HeroPreference, PriorityMode, Questionnaire, ShippingCharge};
use tracing::debug;

use crate::app;
use crate::config::DeskConfig;
use crate::render;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Proforma invoices and gift hamper recommendations for a Loopify sale base.
#[derive(Debug, Parser)]
#[command(name = "gift-desk", version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML config file. Defaults to `gift-desk.toml` when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,gift_airtable=trace`.
    /// Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one invoice with its line items and totals.
    Invoice(InvoiceArgs),

    /// List the most recent invoices.
    Recent {
        /// Number of invoices to list.
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Recommend gift hampers for a client brief.
    Hampers(HamperArgs),

    /// Look up gift hampers in the catalog table by id.
    Catalog {
        /// Gift hamper ids, at most ten. Comma separated lists are split.
        #[arg(required = true, num_args = 1..)]
        gh_ids: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct InvoiceArgs {
    /// Invoice number, e.g. `LW/24-25/118`.
    pub number: String,

    /// Pre-GST shipping charge to append as a "Shipping & Handling" row.
    #[arg(long)]
    pub shipping: Option<String>,

    /// GST percent for the shipping row.
    #[arg(long, default_value = "18")]
    pub shipping_gst: String,

    /// Quantity for the shipping row.
    #[arg(long, default_value_t = 1)]
    pub shipping_qty: i64,

    /// Admin password; needed to change the invoice when one is configured.
    #[arg(long)]
    pub password: Option<String>,

    /// Print the invoice as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HamperArgs {
    /// Client name.
    #[arg(long)]
    pub client: String,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Delivery date, YYYY-MM-DD.
    #[arg(long)]
    pub delivery_date: NaiveDate,

    /// Budget in rupees.
    #[arg(long, default_value = "2000")]
    pub budget: String,

    /// Whether the budget is for one hamper or the whole order.
    #[arg(long, default_value = "per-hamper", value_parser = parse_budget_mode)]
    pub budget_mode: BudgetMode,

    /// Number of hampers ordered.
    #[arg(long, default_value_t = 10)]
    pub quantity: i64,

    /// Preferred hero category.
    #[arg(long, default_value = "no-preference", value_parser = parse_hero)]
    pub hero: HeroPreference,

    /// What to optimise for: balanced, budget, fast or premium.
    #[arg(long, default_value = "balanced", value_parser = parse_priority)]
    pub priority: PriorityMode,

    /// Longest acceptable lead time in days.
    #[arg(long, default_value_t = 7)]
    pub max_lead_time: u32,

    /// Items the client insists on. Repeat for several.
    #[arg(long = "must-have")]
    pub must_have: Vec<String>,

    /// Seed for reproducible recommendations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the hampers as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn parse_budget_mode(s: &str) -> Result<BudgetMode, String> {
    BudgetMode::parse(s).ok_or_else(|| format!("expected 'total' or 'per-hamper', got '{s}'"))
}

fn parse_hero(s: &str) -> Result<HeroPreference, String> {
    HeroPreference::parse(s).ok_or_else(|| format!("unknown hero preference '{s}'"))
}

fn parse_priority(s: &str) -> Result<PriorityMode, String> {
    PriorityMode::parse(s).ok_or_else(|| format!("unknown priority mode '{s}'"))
}

impl HamperArgs {
    pub fn to_questionnaire(&self) -> Result<Questionnaire> {
        Ok(Questionnaire {
            client_name: self.client.clone(),
            company: self.company.clone(),
            delivery_date: Some(self.delivery_date),
            budget_mode: self.budget_mode,
            budget: parse_decimal(&self.budget).context("Invalid --budget")?,
            quantity: self.quantity,
            hero_preference: self.hero,
            must_have_items: self.must_have.clone(),
            max_lead_time_days: self.max_lead_time,
            priority_mode: self.priority,
            ..Default::default()
        })
    }
}

impl InvoiceArgs {
    pub fn shipping_charge(&self) -> Result<Option<ShippingCharge>> {
        let Some(shipping) = &self.shipping else {
            return Ok(None);
        };
        Ok(Some(ShippingCharge {
            pre_gst_price: parse_decimal(shipping).context("Invalid --shipping")?,
            gst_percent: parse_decimal(&self.shipping_gst).context("Invalid --shipping-gst")?,
            quantity: self.shipping_qty,
        }))
    }
}

// ─── dispatch ────────────────────────────────────────────────────────────────

/// Runs one subcommand and returns the text to print on stdout.
pub async fn run(
    command: &Command,
    config: &DeskConfig,
) -> Result<String> {
    match command {
        Command::Invoice(args) => {
            let charge = args.shipping_charge()?;
            let store = app::open_store(config).await?;
            let invoice = app::load_invoice(&*store, &args.number, &config.invoice).await?;

            let invoice = match charge {
                Some(charge) => {
                    let mut session =
                        app::open_session(invoice, &config.invoice, args.password.as_deref())?;
                    app::apply_shipping(&mut session, charge)?;
                    session.into_invoice()
                }
                None => invoice,
            };

            if args.json {
                serde_json::to_string_pretty(&invoice).context("Failed to serialize invoice")
            } else {
                Ok(render::render_invoice(&invoice))
            }
        }
        Command::Recent { limit } => {
            let store = app::open_store(config).await?;
            let invoices = app::recent_invoices(&*store, *limit).await?;
            Ok(render::render_recent(&invoices))
        }
        Command::Hampers(args) => {
            let questionnaire = args.to_questionnaire()?;
            let hampers = app::design_hampers(&questionnaire, args.seed)?;

            if args.json {
                let quotes: HashMap<&str, _> = hampers
                    .iter()
                    .map(|h| (h.id.as_str(), h.quote(&HashMap::new())))
                    .collect();
                let output = serde_json::json!({ "hampers": hampers, "quotes": quotes });
                serde_json::to_string_pretty(&output).context("Failed to serialize hampers")
            } else {
                Ok(render::render_hampers(&hampers))
            }
        }
        Command::Catalog { gh_ids } => {
            let gh_ids = app::collect_gh_ids(gh_ids);
            let store = app::open_store(config).await?;
            let lookup = app::lookup_catalog(&*store, &gh_ids).await?;
            debug!(
                found = lookup.found.len(),
                failed = lookup.failed.len(),
                "Catalog lookup finished"
            );
            Ok(render::render_catalog(&lookup))
        }
    }
}
