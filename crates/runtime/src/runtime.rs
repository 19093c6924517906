//! High-level runtime orchestrator.
//!
//! The runtime owns the derivation service and the change-feed worker and
//! exposes a builder-based API for clients to derive, rest, and unload
//! records.

use std::env;
use std::sync::Arc;

use sheet_core::{ConfigOracle, RecordId, RecordPatch, RestKind};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{DerivationReport, Result, RuntimeError};
use crate::events::{Notice, NotificationBus, Notifier};
use crate::repository::DocumentStore;
use crate::service::SheetService;
use crate::workers::ChangeFeedWorker;

/// Runtime tuning shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub notice_buffer_size: usize,
    /// Re-derive records whenever the store reports a change.
    pub watch_changes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            notice_buffer_size: NotificationBus::DEFAULT_CAPACITY,
            watch_changes: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_NOTICE_BUFFER` - Notification queue size (default: 64)
    /// - `SHEET_WATCH_CHANGES` - Re-derive on store changes (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("SHEET_NOTICE_BUFFER") {
            config.notice_buffer_size = capacity.max(1);
        }

        if let Some(watch) = read_env::<bool>("SHEET_WATCH_CHANGES") {
            config.watch_changes = watch;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that keeps a store's records derived.
pub struct SheetRuntime {
    service: Arc<SheetService>,
    notices: NotificationBus,
    watcher: Option<(oneshot::Sender<()>, JoinHandle<()>)>,
}

impl SheetRuntime {
    /// Create a new runtime builder
    pub fn builder() -> SheetRuntimeBuilder {
        SheetRuntimeBuilder::new()
    }

    /// Subscribe to user-facing notices.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Runs a derivation pass for `id` and schedules its item batch.
    pub async fn derive(&self, id: &RecordId) -> Result<DerivationReport> {
        self.service.derive(id).await
    }

    /// Applies a rest. The following pass picks up the new base values.
    pub async fn rest(&self, id: &RecordId, kind: RestKind) -> Result<RecordPatch> {
        self.service.rest(id, kind).await
    }

    /// Forgets the per-record runtime state of `id`.
    pub fn unload(&self, id: &RecordId) -> bool {
        self.service.unload(id)
    }

    /// Whether an item batch for `id` is still being written.
    pub fn is_batch_in_flight(&self, id: &RecordId) -> bool {
        self.service.ledger().is_in_flight(id)
    }

    /// Stops background workers.
    pub async fn shutdown(self) -> Result<()> {
        if let Some((stop, handle)) = self.watcher {
            let _ = stop.send(());
            handle.await.map_err(RuntimeError::WorkerJoin)?;
        }
        info!("runtime shut down");
        Ok(())
    }
}

/// Builder that wires the store, configuration, and workers together.
pub struct SheetRuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn DocumentStore>>,
    sheet_config: Option<Arc<dyn ConfigOracle>>,
}

impl SheetRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            sheet_config: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Configuration registry the passes read.
    pub fn sheet_config(mut self, config: Arc<dyn ConfigOracle>) -> Self {
        self.sheet_config = Some(config);
        self
    }

    pub async fn build(self) -> Result<SheetRuntime> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let sheet_config = self.sheet_config.ok_or(RuntimeError::MissingConfig)?;

        let notices = NotificationBus::with_capacity(self.config.notice_buffer_size);
        let notifier: Arc<dyn Notifier> = Arc::new(notices.clone());
        let changes = store.subscribe_changes();
        let service = Arc::new(SheetService::new(store, sheet_config, notifier));

        let watcher = match changes {
            Some(changes) if self.config.watch_changes => {
                let (stop, shutdown) = oneshot::channel();
                let worker = ChangeFeedWorker::new(Arc::clone(&service), changes, shutdown);
                Some((stop, tokio::spawn(worker.run())))
            }
            _ => {
                debug!("change feed disabled");
                None
            }
        };

        Ok(SheetRuntime {
            service,
            notices,
            watcher,
        })
    }
}
