//! Public API surface for runtime consumers.

mod errors;
mod report;

pub use errors::{Result, RuntimeError, StoreError};
pub use report::{BatchTicket, DerivationReport};
