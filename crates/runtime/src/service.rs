//! Derivation service shared by the runtime and its workers.

use std::sync::Arc;

use sheet_core::{
    ConfigOracle, DerivationPipeline, RecordId, RecordPatch, RestKind, SheetError, rest,
};
use tracing::{debug, info, warn};

use crate::api::{DerivationReport, Result, RuntimeError};
use crate::events::{Notice, Notifier};
use crate::ledger::RecordLedger;
use crate::repository::DocumentStore;
use crate::workers::UpdateBatcher;

/// Loads records, runs passes, and hands their batches to the batcher.
pub struct SheetService {
    store: Arc<dyn DocumentStore>,
    config: Arc<dyn ConfigOracle>,
    notifier: Arc<dyn Notifier>,
    ledger: RecordLedger,
    batcher: UpdateBatcher,
}

impl SheetService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        config: Arc<dyn ConfigOracle>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let ledger = RecordLedger::new();
        let batcher = UpdateBatcher::new(Arc::clone(&store), Arc::clone(&notifier), ledger.clone());
        Self {
            store,
            config,
            notifier,
            ledger,
            batcher,
        }
    }

    pub fn ledger(&self) -> &RecordLedger {
        &self.ledger
    }

    pub fn is_loaded(&self, record: &RecordId) -> bool {
        self.ledger.contains(record)
    }

    /// Runs one pass over the stored record.
    pub async fn derive(&self, id: &RecordId) -> Result<DerivationReport> {
        let record = self
            .store
            .load_record(id)
            .await?
            .ok_or_else(|| RuntimeError::RecordNotFound(id.clone()))?;

        debug!(record = %id, items = record.items.len(), "derivation pass started");
        let derivation = DerivationPipeline::new(self.config.as_ref()).run(&record);

        if let Some(err) = &derivation.level_error {
            warn!(
                record = %id,
                code = err.error_code(),
                severity = err.severity().as_str(),
                error = %err,
                "level table unavailable, keeping stored level"
            );
        }

        let warned = self.ledger.observe_overflow(id, derivation.inventory);
        if warned {
            info!(record = %id, "inventory over capacity");
            self.notifier
                .notify(Notice::OverCapacity { record: id.clone() });
        }

        let batch = self.batcher.submit(id, derivation.patches.clone());
        debug!(
            record = %id,
            patches = derivation.patches.len(),
            capacity = ?derivation.capacity,
            "derivation pass finished"
        );

        Ok(DerivationReport {
            derivation,
            batch,
            warned,
        })
    }

    /// Applies a rest to the stored record and returns the patch written.
    pub async fn rest(&self, id: &RecordId, kind: RestKind) -> Result<RecordPatch> {
        let record = self
            .store
            .load_record(id)
            .await?
            .ok_or_else(|| RuntimeError::RecordNotFound(id.clone()))?;

        let derived = DerivationPipeline::new(self.config.as_ref()).run(&record).record;
        let patch = rest(&derived.sheet, kind);
        if !patch.is_empty() {
            self.store.update_record(id, patch).await?;
        }
        info!(record = %id, ?kind, "rest applied");

        Ok(patch)
    }

    /// Drops the side-table entry for `id`.
    pub fn unload(&self, id: &RecordId) -> bool {
        let removed = self.ledger.remove(id);
        if removed {
            debug!(record = %id, "record unloaded");
        }
        removed
    }
}
