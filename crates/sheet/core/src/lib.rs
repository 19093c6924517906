//! Deterministic character sheet rules.
//!
//! `sheet-core` owns the record and item types and every derivation rule:
//! hit point and wound resolution, level lookup, ability-driven maxima, and
//! the held/dropped reconciliation of an inventory against its carrying
//! capacity. It performs no I/O. A pass reads a [`SheetRecord`] plus a
//! [`ConfigOracle`] and returns a [`Derivation`] whose item patches the
//! runtime writes back to the document store.
pub mod config;
pub mod derive;
pub mod env;
pub mod error;
pub mod inventory;
pub mod state;
pub mod stats;

pub use config::{RoundingPolicy, SheetConfig, SlotRates};
pub use derive::{
    Derivation, DerivationPipeline, DerivationProfile, InventoryStatus, OverflowWatch, RestKind,
    derive, rest,
};
pub use env::ConfigOracle;
pub use error::{ErrorSeverity, SheetError};
pub use inventory::{
    CapacityMode, CapacitySolver, CarriedItem, DropOrder, ItemFields, ItemId, ItemKind, ItemPatch,
    ItemState, PatchBatch, StoredItem, WeaponCondition,
};
pub use state::{
    CharacterSheet, RecordId, RecordKind, RecordPatch, RecruitSheet, Sheet, SheetRecord,
};
pub use stats::{
    Abilities, Ability, Ammo, Counter, Experience, LevelError, LevelTable, Pool, SlotBudget,
};
