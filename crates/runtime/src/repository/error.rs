//! Error types raised by document store implementations.

use sheet_core::{ErrorSeverity, ItemId, RecordId, SheetError};
use thiserror::Error;

/// Errors surfaced by document store implementations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document store lock was poisoned")]
    LockPoisoned,

    #[error("record {0} not found")]
    RecordNotFound(RecordId),

    #[error("item {item} not found in record {record}")]
    ItemNotFound { record: RecordId, item: ItemId },

    #[error("write rejected: {0}")]
    WriteRejected(String),
}

impl SheetError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::RecordNotFound(_) | Self::ItemNotFound { .. } => ErrorSeverity::Validation,
            Self::WriteRejected(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "STORE_LOCK_POISONED",
            Self::RecordNotFound(_) => "STORE_RECORD_NOT_FOUND",
            Self::ItemNotFound { .. } => "STORE_ITEM_NOT_FOUND",
            Self::WriteRejected(_) => "STORE_WRITE_REJECTED",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
