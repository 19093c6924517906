//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the document store and worker coordination so clients
//! can bubble them up with consistent context.
use sheet_core::RecordId;
use thiserror::Error;

pub use crate::repository::StoreError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("record {0} not found")]
    RecordNotFound(RecordId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a document store before building")]
    MissingStore,

    #[error("runtime requires a sheet configuration before building")]
    MissingConfig,
}
