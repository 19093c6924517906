//! Derivation passes over stored records.
pub mod overflow;
pub mod pipeline;
pub mod rest;

pub use overflow::{InventoryStatus, OverflowWatch};
pub use pipeline::{Derivation, DerivationPipeline, DerivationProfile, derive};
pub use rest::{RestKind, rest};
