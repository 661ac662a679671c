//! waybill: A standalone tool for filtering delivery order files.
//!
//! This tool reads newline-delimited JSON order records from a file,
//! keeps the ones matching a configured district and minimum delivery
//! time, writes them to an output file, and records progress and errors
//! to the console and a run log file.

use clap::Parser;
use snafu::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waybill::config::Config;
use waybill::error::{ConfigSnafu, PipelineError};
use waybill::pipeline::run_pipeline;

/// Delivery order filtering tool.
#[derive(Parser, Debug)]
#[command(name = "waybill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Dry run - validate configuration without processing.
    #[arg(long)]
    dry_run: bool,
}

#[snafu::report]
#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("waybill starting");

    let config = Config::from_file(&args.config).context(ConfigSnafu)?;

    if args.dry_run {
        info!("Dry run mode - validating configuration");
        info!("Source: {}", config.source.path);
        info!("Sink: {}", config.sink.path);
        info!("Run log: {}", config.run_log.path);
        info!("District filter: {}", config.filter.district);
        info!("Not before: {}", config.filter.not_before);
        info!("Configuration is valid");
        return Ok(());
    }

    let stats = run_pipeline(config).await?;

    info!("Run completed");
    info!("  Lines read: {}", stats.lines_read);
    info!("  Orders read: {}", stats.orders_read);
    info!("  Lines skipped: {}", stats.lines_skipped);
    info!("  Orders matched: {}", stats.orders_matched);
    info!("  Records written: {}", stats.records_written);

    Ok(())
}
