//! Document store contract.

use async_trait::async_trait;
use sheet_core::{ItemPatch, RecordId, RecordPatch, SheetRecord};
use tokio::sync::broadcast;

use super::error::Result;
use crate::events::StoreEvent;

/// External store that owns records and their items.
///
/// Derivation only reads base fields and writes derived item fields back
/// through [`DocumentStore::write_items`]. Records are never created or
/// deleted from here.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Current stored state of a record, or `None` if it does not exist.
    async fn load_record(&self, id: &RecordId) -> Result<Option<SheetRecord>>;

    /// Applies all patches to the record's items atomically: either every
    /// patch lands or none does.
    async fn write_items(&self, id: &RecordId, patches: Vec<ItemPatch>) -> Result<()>;

    /// Writes base scalar fields of a record.
    async fn update_record(&self, id: &RecordId, patch: RecordPatch) -> Result<()>;

    /// Feed of committed writes, if the store publishes one.
    fn subscribe_changes(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        None
    }
}
