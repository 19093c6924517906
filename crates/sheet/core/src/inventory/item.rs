//! Inventory items and the held/dropped normalizer.
//!
//! An item's quantity is split into units that are carried (`held`) and units
//! left behind. The stored split can be missing or stale after the host edits
//! quantities, so every pass rebuilds the canonical [`ItemState`] from what is
//! stored and emits a patch only where the two disagree.

use serde::{Deserialize, Deserializer};

use super::patch::{ItemFields, ItemPatch};

/// Identity of an item within its owning record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad item category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Armor,
    #[default]
    Equipment,
    LightSource,
    Spellbook,
    MonsterAttack,
}

/// An item exactly as the document store holds it.
///
/// Derived fields are optional and leniently parsed: a `held` that is not a
/// finite number or a `dropped` that is not a boolean reads as absent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub quantity: u32,
    /// Capacity cost of a single unit.
    #[serde(default)]
    pub slots: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub held: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub dropped: Option<bool>,
    #[serde(default)]
    pub dropped_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub progress: Option<f64>,

    #[serde(default)]
    pub broken: Option<bool>,
    #[serde(default)]
    pub broken_quantity: u32,

    /// Last write time, used for recency ordering.
    #[serde(default)]
    pub modified_time: Option<u64>,
    /// Manual sort order, the fallback when no write time is known.
    #[serde(default)]
    pub sort: i64,
}

impl StoredItem {
    pub fn new(id: impl Into<String>, quantity: u32, slots: f64) -> Self {
        Self {
            id: ItemId::new(id),
            name: String::new(),
            kind: ItemKind::default(),
            quantity,
            slots,
            held: None,
            dropped: None,
            dropped_count: None,
            progress: None,
            broken: None,
            broken_quantity: 0,
            modified_time: None,
            sort: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Stores a canonical split as if a previous pass had written it.
    pub fn with_state(mut self, state: ItemState) -> Self {
        self.held = Some(f64::from(state.held));
        self.dropped = Some(state.dropped);
        self.dropped_count = Some(state.dropped_count);
        self.progress = Some(state.progress);
        self
    }

    pub fn with_held(mut self, held: u32) -> Self {
        self.held = Some(f64::from(held));
        self
    }

    pub fn with_modified_time(mut self, modified_time: u64) -> Self {
        self.modified_time = Some(modified_time);
        self
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_broken_quantity(mut self, broken_quantity: u32) -> Self {
        self.broken_quantity = broken_quantity;
        self
    }

    /// Per-unit cost, with negative or non-finite costs read as zero.
    pub fn unit_slots(&self) -> f64 {
        if self.slots.is_finite() && self.slots > 0.0 {
            self.slots
        } else {
            0.0
        }
    }

    /// Fields of the stored split that differ from `state`.
    pub fn state_diff(&self, state: &ItemState) -> ItemFields {
        let mut fields = ItemFields::empty();
        if self.held != Some(f64::from(state.held)) {
            fields |= ItemFields::HELD;
        }
        if self.dropped != Some(state.dropped) {
            fields |= ItemFields::DROPPED;
        }
        if self.dropped_count != Some(state.dropped_count) {
            fields |= ItemFields::DROPPED_COUNT;
        }
        if self.progress != Some(state.progress) {
            fields |= ItemFields::PROGRESS;
        }
        fields
    }

    /// Writes a patch into the stored fields.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(state) = patch.state {
            self.held = Some(f64::from(state.held));
            self.dropped = Some(state.dropped);
            self.dropped_count = Some(state.dropped_count);
            self.progress = Some(state.progress);
        }
        if let Some(condition) = patch.condition {
            self.broken = Some(condition.broken);
            self.broken_quantity = condition.broken_quantity;
        }
    }
}

/// Canonical held/dropped split of one item.
///
/// Invariants: `held <= quantity`, `dropped_count = quantity - held`,
/// `dropped = (held == 0)`, and `progress` is the dropped share in percent
/// (0 for an empty stack).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemState {
    pub held: u32,
    pub dropped: bool,
    pub dropped_count: u32,
    pub progress: f64,
}

impl ItemState {
    /// Builds the split for `held` carried units out of `quantity`.
    pub fn from_held(quantity: u32, held: u32) -> Self {
        let held = held.min(quantity);
        let dropped_count = quantity - held;
        let progress = if quantity > 0 {
            f64::from(dropped_count) / f64::from(quantity) * 100.0
        } else {
            0.0
        };

        Self {
            held,
            dropped: held == 0,
            dropped_count,
            progress,
        }
    }

    /// Nothing dropped.
    pub fn all_held(quantity: u32) -> Self {
        Self::from_held(quantity, quantity)
    }

    /// True when at least one unit is left behind.
    pub fn has_dropped_units(&self) -> bool {
        self.dropped_count > 0
    }
}

/// Rebuilds the canonical split from the stored one.
///
/// A usable stored `held` is kept (clamped to the quantity). Without one the
/// whole stack counts as held. A stored `dropped = true` wins over `held`.
pub fn normalize(item: &StoredItem) -> ItemState {
    let quantity = item.quantity;
    let held = item
        .held
        .filter(|held| held.is_finite())
        .map(|held| held.clamp(0.0, f64::from(quantity)).floor() as u32)
        .unwrap_or(quantity);

    let held = if item.dropped == Some(true) { 0 } else { held };

    ItemState::from_held(quantity, held)
}

/// Normalizes one item and returns a patch only if the stored split differs.
pub fn normalize_with_patch(item: &StoredItem) -> (ItemState, Option<ItemPatch>) {
    let state = normalize(item);
    let changed = item.state_diff(&state);
    let patch = (!changed.is_empty()).then(|| ItemPatch::state(item.id.clone(), state, changed));
    (state, patch)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_f64()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_bool()))
}
