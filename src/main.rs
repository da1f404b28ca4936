#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use conduit::{Cli, Config};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn log_level() -> Level {
    std::env::var("CONDUIT_LOG")
        .ok()
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(Level::WARN)
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    conduit::app::dispatch::dispatch(cli, config).await?;
    Ok(())
}
