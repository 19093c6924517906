//! What a derivation request hands back to the caller.

use sheet_core::Derivation;
use tokio::task::JoinHandle;

use super::errors::{Result, RuntimeError};

/// Fate of the item batch produced by a pass.
#[derive(Debug)]
pub enum BatchTicket {
    /// Nothing to write; the store already matches the pass.
    Settled,
    /// Another batch for the record was still in flight, so this one was
    /// discarded. The next pass recomputes the same target.
    Suppressed,
    /// The batch was handed to a background task.
    Scheduled(JoinHandle<()>),
}

impl BatchTicket {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }

    /// Waits for a scheduled batch to settle.
    ///
    /// A failed write is not an error here: it has already been reported on
    /// the notification channel.
    pub async fn wait(self) -> Result<()> {
        if let Self::Scheduled(handle) = self {
            handle.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }
}

/// One completed pass plus the state of its write.
#[derive(Debug)]
pub struct DerivationReport {
    pub derivation: Derivation,
    pub batch: BatchTicket,
    /// Whether this pass raised the capacity warning.
    pub warned: bool,
}
