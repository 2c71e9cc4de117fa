//! # Seed Data Generator
//!
//! Populates a JSON data directory with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default directory (./data)
//! cargo run -p stockbook-store --bin seed
//!
//! # Seed a specific directory
//! cargo run -p stockbook-store --bin seed -- --data-dir /tmp/shop
//! ```
//!
//! Only empty collections are filled; re-running against a populated
//! directory is a no-op.

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockbook_store::seed::seed_if_empty;
use stockbook_store::{JsonFileBackend, Store, StoreResult};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let data_dir = parse_data_dir().unwrap_or_else(|| "./data".to_string());

    match run(&data_dir) {
        Ok(true) => {
            info!(data_dir = %data_dir, "Seed complete");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            info!(data_dir = %data_dir, "Store already populated, nothing to do");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, data_dir = %data_dir, "Seed failed");
            ExitCode::FAILURE
        }
    }
}

fn run(data_dir: &str) -> StoreResult<bool> {
    let backend = JsonFileBackend::new(data_dir);
    let mut store = Store::open(Box::new(backend))?;
    let seeded = seed_if_empty(&mut store)?;
    store.flush()?;
    Ok(seeded)
}

/// Parses `--data-dir <path>` from the command line.
fn parse_data_dir() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--data-dir")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
