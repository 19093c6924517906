//! Inventory reconciliation.
//!
//! Items are first normalized one by one, then the [`CapacitySolver`] moves
//! units between held and dropped until the record fits its budget. Only
//! fields that end up different from what is stored are turned into
//! [`ItemPatch`]es.

pub mod capacity;
pub mod condition;
pub mod item;
pub mod patch;
pub mod slots;

pub use capacity::{CapacityMode, CapacitySolver, CarriedItem, DropOrder};
pub use condition::{WeaponCondition, condition_patch, weapon_condition};
pub use item::{ItemId, ItemKind, ItemState, StoredItem, normalize, normalize_with_patch};
pub use patch::{ItemFields, ItemPatch, PatchBatch};
pub use slots::resource_load;
