//! Per-record side table.
//!
//! Holds the runtime state that belongs to a record but is not part of it:
//! whether an item batch is in flight and whether the capacity warning has
//! already been raised. Entries are created on first use and removed when the
//! record is unloaded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sheet_core::{InventoryStatus, OverflowWatch, RecordId};

#[derive(Debug, Default)]
struct RecordState {
    /// Ticket of the batch currently in flight.
    in_flight: Option<u64>,
    overflow: OverflowWatch,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<RecordId, RecordState>,
    next_ticket: u64,
}

/// Shared, cloneable handle to the side table.
#[derive(Clone, Debug, Default)]
pub struct RecordLedger {
    inner: Arc<Mutex<Inner>>,
}

impl RecordLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // The table only holds flags, so a panic elsewhere cannot leave it in a
    // state worth refusing to read.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks a batch in flight for `record`.
    ///
    /// Returns `None` if one already is. The flag is released when the
    /// returned guard is dropped.
    pub fn try_begin_batch(&self, record: &RecordId) -> Option<InFlightGuard> {
        let mut inner = self.lock();
        inner.next_ticket += 1;
        let ticket = inner.next_ticket;

        let state = inner.records.entry(record.clone()).or_default();
        if state.in_flight.is_some() {
            return None;
        }
        state.in_flight = Some(ticket);

        Some(InFlightGuard {
            ledger: self.clone(),
            record: record.clone(),
            ticket,
        })
    }

    pub fn is_in_flight(&self, record: &RecordId) -> bool {
        self.lock()
            .records
            .get(record)
            .is_some_and(|state| state.in_flight.is_some())
    }

    /// Feeds one pass into the record's overflow latch. Returns `true` when
    /// the capacity warning should be raised.
    pub fn observe_overflow(&self, record: &RecordId, status: InventoryStatus) -> bool {
        self.lock()
            .records
            .entry(record.clone())
            .or_default()
            .overflow
            .observe(status)
    }

    /// True once a pass has run for `record` and it was not unloaded since.
    pub fn contains(&self, record: &RecordId) -> bool {
        self.lock().records.contains_key(record)
    }

    /// Forgets everything about `record`.
    pub fn remove(&self, record: &RecordId) -> bool {
        self.lock().records.remove(record).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, record: &RecordId, ticket: u64) {
        if let Some(state) = self.lock().records.get_mut(record)
            && state.in_flight == Some(ticket)
        {
            state.in_flight = None;
        }
    }
}

/// Clears the in-flight flag on drop, on every exit path of the write.
#[derive(Debug)]
pub struct InFlightGuard {
    ledger: RecordLedger,
    record: RecordId,
    ticket: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ledger.release(&self.record, self.ticket);
    }
}
