//! Typed item patches and per-pass coalescing.

use std::collections::BTreeMap;

use bitflags::bitflags;

use super::condition::WeaponCondition;
use super::item::{ItemId, ItemState};

bitflags! {
    /// Tracks which derived fields of a stored item a patch rewrites.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct ItemFields: u8 {
        const HELD            = 1 << 0;
        const DROPPED         = 1 << 1;
        const DROPPED_COUNT   = 1 << 2;
        const PROGRESS        = 1 << 3;
        const BROKEN          = 1 << 4;
        const BROKEN_QUANTITY = 1 << 5;
    }
}

/// Write addressed to one item of the owning record.
///
/// The held/dropped split is always written as a whole so the stored tuple
/// can never be half-updated; `changed` records which fields actually differ.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub item_id: ItemId,
    pub state: Option<ItemState>,
    pub condition: Option<WeaponCondition>,
    pub changed: ItemFields,
}

impl ItemPatch {
    pub fn state(item_id: ItemId, state: ItemState, changed: ItemFields) -> Self {
        Self {
            item_id,
            state: Some(state),
            condition: None,
            changed,
        }
    }

    pub fn condition(item_id: ItemId, condition: WeaponCondition, changed: ItemFields) -> Self {
        Self {
            item_id,
            state: None,
            condition: Some(condition),
            changed,
        }
    }

    /// Folds a later patch for the same item into this one. Later values win.
    pub fn merge(&mut self, later: ItemPatch) {
        debug_assert_eq!(self.item_id, later.item_id, "cannot merge patches for different items");
        if later.state.is_some() {
            self.state = later.state;
        }
        if later.condition.is_some() {
            self.condition = later.condition;
        }
        self.changed |= later.changed;
    }
}

/// All item patches produced by one pass, at most one per item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchBatch {
    patches: BTreeMap<ItemId, ItemPatch>,
}

impl PatchBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a patch, merging it into any earlier patch for the same item.
    pub fn push(&mut self, patch: ItemPatch) {
        match self.patches.get_mut(&patch.item_id) {
            Some(existing) => existing.merge(patch),
            None => {
                self.patches.insert(patch.item_id.clone(), patch);
            }
        }
    }

    pub fn extend(&mut self, patches: impl IntoIterator<Item = ItemPatch>) {
        for patch in patches {
            self.push(patch);
        }
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&ItemPatch> {
        self.patches.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemPatch> {
        self.patches.values()
    }

    pub fn into_vec(self) -> Vec<ItemPatch> {
        self.patches.into_values().collect()
    }
}

impl FromIterator<ItemPatch> for PatchBatch {
    fn from_iter<T: IntoIterator<Item = ItemPatch>>(iter: T) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_state_wins_and_fields_accumulate() {
        let id = ItemId::new("rope");
        let mut batch = PatchBatch::new();
        batch.push(ItemPatch::state(
            id.clone(),
            ItemState::all_held(2),
            ItemFields::HELD,
        ));
        batch.push(ItemPatch::state(
            id.clone(),
            ItemState::from_held(2, 0),
            ItemFields::DROPPED,
        ));

        assert_eq!(batch.len(), 1);
        let patch = batch.get(&id).unwrap();
        assert_eq!(patch.state, Some(ItemState::from_held(2, 0)));
        assert_eq!(patch.changed, ItemFields::HELD | ItemFields::DROPPED);
    }

    #[test]
    fn condition_and_state_combine() {
        let id = ItemId::new("sword");
        let batch: PatchBatch = [
            ItemPatch::state(id.clone(), ItemState::all_held(1), ItemFields::HELD),
            ItemPatch::condition(
                id.clone(),
                WeaponCondition {
                    broken: true,
                    broken_quantity: 1,
                },
                ItemFields::BROKEN,
            ),
        ]
        .into_iter()
        .collect();

        let patch = batch.get(&id).unwrap();
        assert!(patch.state.is_some());
        assert!(patch.condition.is_some_and(|c| c.broken));
    }
}
