//! Change-feed worker.
//!
//! Re-runs the derivation pass for every record the store reports as changed,
//! the same way the host re-prepares a document after each update. Batch
//! writes feed back into this loop; the loop guard and idempotent passes make
//! the resulting storm settle after one extra, empty pass.

use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

use crate::events::StoreEvent;
use crate::service::SheetService;

pub struct ChangeFeedWorker {
    service: Arc<SheetService>,
    changes: broadcast::Receiver<StoreEvent>,
    shutdown: oneshot::Receiver<()>,
}

impl ChangeFeedWorker {
    pub fn new(
        service: Arc<SheetService>,
        changes: broadcast::Receiver<StoreEvent>,
        shutdown: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            service,
            changes,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        info!("change feed worker started");

        loop {
            tokio::select! {
                _ = &mut self.shutdown => break,
                received = self.changes.recv() => match received {
                    Ok(event) => self.handle(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "change feed lagged, some passes were skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }

        info!("change feed worker stopped");
    }

    async fn handle(&self, event: StoreEvent) {
        let record = event.record().clone();
        if !self.service.is_loaded(&record) {
            debug!(record = %record, "change for unloaded record ignored");
            return;
        }

        if let Err(err) = self.service.derive(&record).await {
            warn!(record = %record, error = %err, "re-derivation after change failed");
        }
    }
}
