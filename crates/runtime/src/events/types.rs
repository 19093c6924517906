//! Event payloads published by the runtime and the document store.

use serde::{Deserialize, Serialize};
use sheet_core::RecordId;

/// What kind of write produced a [`StoreEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    /// A batch of item patches.
    Items,
    /// A write to the record's own fields.
    Record,
}

/// Committed write announced on a store's change feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    RecordChanged { record: RecordId, cause: ChangeCause },
}

impl StoreEvent {
    pub fn record(&self) -> &RecordId {
        match self {
            Self::RecordChanged { record, .. } => record,
        }
    }
}

/// User-facing warnings. These are the only conditions ever surfaced to the
/// player; everything else is normalized silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The record just started leaving items behind.
    OverCapacity { record: RecordId },
    /// A batch of item writes did not land.
    BatchWriteFailed { record: RecordId, reason: String },
}

impl Notice {
    pub fn record(&self) -> &RecordId {
        match self {
            Self::OverCapacity { record } | Self::BatchWriteFailed { record, .. } => record,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::OverCapacity { .. } => {
                "Your inventory is full. You may need to drop something.".to_owned()
            }
            Self::BatchWriteFailed { reason, .. } => {
                format!("Failed to update inventory: {reason}")
            }
        }
    }
}
