//! Sheet client binary.
//!
//! Composition root: loads the configuration registry and one record from
//! disk, seeds an in-memory document store, runs a derivation pass through
//! the runtime, waits for its item batch, and prints the derived record as
//! JSON on stdout.
//!
//! ```bash
//! SHEET_CONFIG=data/config.toml cargo run -p sheet-client -- data/records/hero.ron
//! ```

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use sheet_content::{ConfigLoader, RecordLoader};
use sheet_core::SheetConfig;
use sheet_runtime::{InMemoryDocumentStore, RuntimeConfig, SheetRuntime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    let sheet_config = match &client_config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => {
            tracing::info!("SHEET_CONFIG not set, using default configuration");
            SheetConfig::default()
        }
    };

    let record_path = client_config
        .record_path
        .context("no record given: pass a path or set SHEET_RECORD")?;
    let record = RecordLoader::load(&record_path)?;
    let record_id = record.id.clone();
    tracing::info!(record = %record_id, path = %record_path.display(), "record loaded");

    let store = Arc::new(InMemoryDocumentStore::new());
    store.insert(record)?;

    let runtime = SheetRuntime::builder()
        .config(runtime_config)
        .store(store.clone())
        .sheet_config(Arc::new(sheet_config))
        .build()
        .await?;
    let mut notices = runtime.subscribe_notices();

    let report = runtime.derive(&record_id).await?;
    let derived = report.derivation.record.clone();
    report.batch.wait().await?;

    while let Ok(notice) = notices.try_recv() {
        tracing::warn!(record = %notice.record(), "{}", notice.message());
    }

    runtime.shutdown().await?;

    println!("{}", serde_json::to_string_pretty(&derived)?);
    Ok(())
}

/// Logs to stderr so stdout stays clean for the derived record.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
