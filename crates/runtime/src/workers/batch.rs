//! Update batcher and loop guard.
//!
//! A pass hands over at most one coalesced batch per record. The batch is
//! written on a later scheduling tick rather than inline, so the write (and the
//! change it publishes) can never re-enter the pass that produced it. While a
//! batch is in flight, newer batches for the same record are dropped.

use std::sync::Arc;

use sheet_core::{PatchBatch, RecordId, SheetError};
use tracing::{debug, error, warn};

use crate::api::BatchTicket;
use crate::events::{Notice, Notifier};
use crate::ledger::RecordLedger;
use crate::repository::DocumentStore;

/// Schedules item batches against a document store.
#[derive(Clone)]
pub struct UpdateBatcher {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    ledger: RecordLedger,
}

impl UpdateBatcher {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        ledger: RecordLedger,
    ) -> Self {
        Self {
            store,
            notifier,
            ledger,
        }
    }

    /// Schedules `batch` for `record` unless it is empty or another batch is
    /// still in flight.
    pub fn submit(&self, record: &RecordId, batch: PatchBatch) -> BatchTicket {
        if batch.is_empty() {
            return BatchTicket::Settled;
        }

        let Some(guard) = self.ledger.try_begin_batch(record) else {
            debug!(record = %record, patches = batch.len(), "batch suppressed, write in flight");
            return BatchTicket::Suppressed;
        };

        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let record = record.clone();
        let patches = batch.into_vec();
        debug!(record = %record, patches = patches.len(), "batch scheduled");

        BatchTicket::Scheduled(tokio::spawn(async move {
            let _guard = guard;
            tokio::task::yield_now().await;

            match store.write_items(&record, patches).await {
                Ok(()) => debug!(record = %record, "batch written"),
                Err(err) => {
                    let severity = err.severity();
                    if severity.is_internal() {
                        error!(
                            record = %record,
                            code = err.error_code(),
                            severity = severity.as_str(),
                            error = %err,
                            "batch write failed"
                        );
                    } else {
                        warn!(
                            record = %record,
                            code = err.error_code(),
                            severity = severity.as_str(),
                            error = %err,
                            "batch write failed"
                        );
                    }
                    notifier.notify(Notice::BatchWriteFailed {
                        record,
                        reason: err.to_string(),
                    });
                }
            }
        }))
    }
}
