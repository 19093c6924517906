//! Async orchestration around the sheet rules.
//!
//! This crate connects [`sheet_core`] passes to an external document store.
//! Consumers embed [`SheetRuntime`] to derive records, apply rests, and
//! receive the notices a pass raises.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] carries user-facing notices and store change events
//! - [`repository`] defines the document store port and an in-memory adapter
//! - [`ledger`] keeps per-record runtime flags outside the records
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod ledger;
pub mod repository;
pub mod runtime;

mod service;
mod workers;

pub use api::{BatchTicket, DerivationReport, Result, RuntimeError, StoreError};
pub use events::{ChangeCause, Notice, NotificationBus, Notifier, StoreEvent};
pub use ledger::{InFlightGuard, RecordLedger};
pub use repository::{DocumentStore, InMemoryDocumentStore};
pub use runtime::{RuntimeConfig, SheetRuntime, SheetRuntimeBuilder};
pub use workers::UpdateBatcher;
