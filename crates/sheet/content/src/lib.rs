//! File loaders for sheet configuration and record fixtures.
//!
//! - Configuration registry (TOML)
//! - Level breakpoint tables (JSON, the same format the registry stores)
//! - Records with their inventories (RON or JSON)
//!
//! Loaded content is handed to the runtime; nothing here derives anything.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LevelTableLoader, LoadResult, RecordLoader};
