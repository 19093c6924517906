//! Document store port and adapters.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
