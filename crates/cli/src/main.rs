//! wadash - operator console for the WhatsApp scraper admin API
//!
//! Main entry point for the command-line client.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::context::AppContext;

const DEFAULT_LOG_FILTER: &str = "warn,wadash=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so RUST_LOG and WADASH_* from it apply below
    let dotenv = dotenvy::dotenv();

    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Could not load .env file"),
    }

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config, cli.json)?;
    commands::dispatch(&ctx, cli.command).await
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
