//! # Hackathon Tracker Binary
//!
//! Runs one tracker command against the configured table and prints the result as JSON.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracker_bin::{
    commands::{self, Command},
    initialization,
};
use tracker_config::load_or_default;
use tracker_observe::{command_span, init_logging, log_slow_operation, record_command_result};
use tracing::Instrument;

const SLOW_COMMAND_MS: u128 = 500;

#[derive(Parser, Debug)]
#[command(name = "hackathon-tracker")]
#[command(about = "Hackathon team and submission tracker", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tracker.yaml")]
    config: String,

    /// Store backend (overrides config)
    #[arg(long)]
    store_backend: Option<String>,

    /// Store file path (overrides config)
    #[arg(long)]
    store_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = load_or_default(&args.config);

    // Override with CLI args
    if let Some(backend) = args.store_backend {
        config.store.backend = backend;
    }
    if let Some(path) = args.store_path {
        config.store.path = Some(path);
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        std::process::exit(1);
    }

    init_logging(initialization::log_config(&config)?)?;

    let (storage, services) = initialization::build_services(&config).await?;

    let name = args.command.name();
    let span = command_span(name);
    let started = Instant::now();
    let outcome =
        commands::execute(args.command, &services, &storage).instrument(span.clone()).await;
    let elapsed = started.elapsed().as_millis();
    record_command_result(&span, outcome.is_ok(), elapsed);
    log_slow_operation(name, elapsed, SLOW_COMMAND_MS);

    if let Some(metrics) = storage.metrics() {
        tracing::debug!(?metrics, "Store metrics");
    }

    let output = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
