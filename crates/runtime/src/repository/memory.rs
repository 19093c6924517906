//! In-memory document store for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sheet_core::{ItemPatch, RecordId, RecordPatch, SheetRecord};
use tokio::sync::broadcast;

use super::error::{Result, StoreError};
use super::traits::DocumentStore;
use crate::events::{ChangeCause, StoreEvent};

/// In-memory implementation of [`DocumentStore`].
///
/// Every committed write bumps a logical clock, stamps the touched items with
/// it as their modification time, and is published on the change feed.
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<RecordId, SheetRecord>>,
    clock: AtomicU64,
    changes: broadcast::Sender<StoreEvent>,
    reject_item_writes: AtomicBool,
    write_delay: Option<Duration>,
}

impl InMemoryDocumentStore {
    pub const DEFAULT_FEED_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_FEED_CAPACITY)
    }

    /// Creates a store whose change feed buffers `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            changes: broadcast::channel(capacity.max(1)).0,
            reject_item_writes: AtomicBool::new(false),
            write_delay: None,
        }
    }

    /// Delays every item write, keeping batches in flight for a while.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Inserts or replaces a record without publishing a change.
    pub fn insert(&self, record: SheetRecord) -> Result<()> {
        let newest = record
            .items
            .iter()
            .filter_map(|item| item.modified_time)
            .max()
            .unwrap_or(0);
        self.clock.fetch_max(newest, Ordering::SeqCst);

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Snapshot of a stored record.
    pub fn get(&self, id: &RecordId) -> Result<Option<SheetRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    /// Makes every following item write fail until switched off again.
    pub fn reject_item_writes(&self, reject: bool) {
        self.reject_item_writes.store(reject, Ordering::SeqCst);
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn publish(&self, record: RecordId, cause: ChangeCause) {
        if self
            .changes
            .send(StoreEvent::RecordChanged { record, cause })
            .is_err()
        {
            tracing::trace!("No subscribers for store changes");
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load_record(&self, id: &RecordId) -> Result<Option<SheetRecord>> {
        self.get(id)
    }

    async fn write_items(&self, id: &RecordId, patches: Vec<ItemPatch>) -> Result<()> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_item_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(format!(
                "item writes to {id} are disabled"
            )));
        }

        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned)?;
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::RecordNotFound(id.clone()))?;

            if let Some(patch) = patches.iter().find(|patch| record.item(&patch.item_id).is_none()) {
                return Err(StoreError::ItemNotFound {
                    record: id.clone(),
                    item: patch.item_id.clone(),
                });
            }

            let stamp = self.tick();
            record.apply_item_patches(&patches);
            for patch in &patches {
                if let Some(item) = record.item_mut(&patch.item_id) {
                    item.modified_time = Some(stamp);
                }
            }
        }

        self.publish(id.clone(), ChangeCause::Items);
        Ok(())
    }

    async fn update_record(&self, id: &RecordId, patch: RecordPatch) -> Result<()> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned)?;
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::RecordNotFound(id.clone()))?;
            record.apply_record_patch(&patch);
        }

        self.publish(id.clone(), ChangeCause::Record);
        Ok(())
    }

    fn subscribe_changes(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        Some(self.changes.subscribe())
    }
}
