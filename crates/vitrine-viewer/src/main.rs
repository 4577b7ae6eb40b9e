//! Vitrine - Main entry point
//!
//! Loads the product catalog and starts the preview viewer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vitrine_core::Catalog;

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Interactive 3D product preview viewer")]
#[command(version)]
struct Args {
    /// Path to the product catalog (TOML or JSON)
    #[arg(short, long, default_value = "catalog.toml")]
    catalog: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Vitrine v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?;

    vitrine_viewer::run(catalog);

    Ok(())
}
