use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Level used when neither `--log-level` nor `RUST_LOG` is given. Report
/// output goes to stdout, so the log stays quiet by default.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// One plain line per event: local time, level, target, fields.
struct DeskFormat;

impl<S, N> FormatEvent<S, N> for DeskFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {:>5} {}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            meta.level(),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the level filter: an explicit directive wins, then `RUST_LOG`,
/// then [`DEFAULT_LOG_LEVEL`].
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))),
    }
}

fn open_log_file(path: &Path) -> Result<Arc<File>> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    Ok(Arc::new(file))
}

/// Initializes logging to stderr, and to `log_file` when given. Call once
/// at startup.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;
    let file = log_file.map(open_log_file).transpose()?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(DeskFormat)
        .with_ansi(false)
        .with_writer(io::stderr);
    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .event_format(DeskFormat)
            .with_ansi(false)
            .with_writer(file)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
