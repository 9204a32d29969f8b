use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gift_core::format::{format_inr, parse_decimal};
use gift_core::{Invoice, InvoiceHeader, InvoiceSession, RecordMapping, ShippingCharge};
use gift_data::LineItemLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute proforma invoice totals for line items in a CSV file.
///
/// The CSV needs a header row. Any column spelling the sale base uses is
/// accepted, e.g. `pre_tax_price` or `Pre GST Price`.
#[derive(Parser, Debug)]
#[command(name = "line-item-totals")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing line items
    #[arg(short, long)]
    file: PathBuf,

    /// Pre-GST shipping charge to append as a "Shipping & Handling" row
    #[arg(long)]
    shipping: Option<String>,

    /// GST percent for the shipping row
    #[arg(long, default_value = "18")]
    shipping_gst: String,

    /// Quantity for the shipping row
    #[arg(long, default_value_t = 1)]
    shipping_qty: i64,

    /// GST percent for rows that carry none
    #[arg(long, default_value = "18")]
    default_gst: String,

    /// Print items and totals as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let default_gst = parse_decimal(&args.default_gst).context("Invalid --default-gst")?;
    let mapping = RecordMapping::new().with_default_gst_percent(default_gst);

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let items = LineItemLoader::parse(file, &mapping)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    info!("Parsed {} line items from {}", items.len(), args.file.display());

    let mut session = InvoiceSession::new(Invoice::new(InvoiceHeader::default(), items), None);

    if let Some(shipping) = &args.shipping {
        let charge = ShippingCharge {
            pre_gst_price: parse_decimal(shipping).context("Invalid --shipping")?,
            gst_percent: parse_decimal(&args.shipping_gst).context("Invalid --shipping-gst")?,
            quantity: args.shipping_qty,
        };
        session
            .add_shipping(charge)
            .context("Failed to add shipping row")?;
    }

    let invoice = session.into_invoice();

    if args.json {
        let output = serde_json::json!({
            "items": invoice.items,
            "totals": invoice.totals,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize totals")?
        );
        return Ok(());
    }

    println!(
        "{:<32} {:>5} {:>14} {:>6} {:>14} {:>16}",
        "Item", "Qty", "Pre-tax", "GST%", "MRP", "Amount"
    );
    for item in &invoice.items {
        println!(
            "{:<32} {:>5} {:>14} {:>6} {:>14} {:>16}",
            item.name,
            item.quantity,
            format_inr(item.pre_tax_price),
            item.gst_percent.normalize(),
            format_inr(item.mrp()),
            format_inr(item.amount()),
        );
    }
    println!();
    println!("{:<20} {:>16}", "Taxable Amount", format_inr(invoice.totals.taxable_amount));
    println!("{:<20} {:>16}", "GST", format_inr(invoice.totals.tax_amount));
    println!("{:<20} {:>16}", "Grand Total", format_inr(invoice.totals.grand_total));

    Ok(())
}
