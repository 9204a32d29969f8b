use clap::Parser;
use tracing::debug;

use gift_cli::config::DeskConfig;
use gift_cli::{Cli, cli, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::init_logging(args.log_level.as_deref(), args.log_file.as_deref())?;

    let config = DeskConfig::load(args.config.as_deref())?;
    debug!(
        backend = config.store.backend.as_str(),
        base = config.store.base_id.as_str(),
        "Configuration loaded"
    );

    let output = cli::run(&args.command, &config).await?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
