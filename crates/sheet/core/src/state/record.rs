//! Record types held by the document store.

use crate::inventory::{ItemId, ItemPatch, StoredItem};
use crate::stats::{Abilities, Ammo, Counter, Experience, Pool, SlotBudget};

/// Identity of a record in the document store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record variant, which selects the derivation profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Character,
    Recruit,
}

/// Full player character.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterSheet {
    pub abilities: Abilities,
    pub hit_points: Pool,
    pub wounds: Pool,
    pub xp: Experience,
    pub slots: SlotBudget,
    pub blessings: Counter,
    pub companions: Counter,
    pub spells: Counter,
    pub ammo: Ammo,
    pub coins: u32,
    /// Derived from `xp` when automatic levelling is on.
    pub level: u32,
    pub label: String,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            abilities: Abilities::default(),
            hit_points: Pool::default(),
            wounds: Pool::default(),
            xp: Experience::default(),
            slots: SlotBudget::default(),
            blessings: Counter::default(),
            companions: Counter::default(),
            spells: Counter::default(),
            ammo: Ammo::default(),
            coins: 0,
            level: 1,
            label: String::new(),
        }
    }
}

/// Simplified hireling record without wounds or experience.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecruitSheet {
    pub hit_points: Pool,
    pub slots: SlotBudget,
    pub spells: Counter,
    pub ammo: Ammo,
    pub coins: u32,
}

impl Default for RecruitSheet {
    fn default() -> Self {
        Self {
            hit_points: Pool::full(3),
            slots: SlotBudget::default(),
            spells: Counter::default(),
            ammo: Ammo::default(),
            coins: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sheet {
    Character(CharacterSheet),
    Recruit(RecruitSheet),
}

impl Sheet {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Character(_) => RecordKind::Character,
            Self::Recruit(_) => RecordKind::Recruit,
        }
    }

    pub fn hit_points(&self) -> &Pool {
        match self {
            Self::Character(sheet) => &sheet.hit_points,
            Self::Recruit(sheet) => &sheet.hit_points,
        }
    }

    pub fn slots(&self) -> &SlotBudget {
        match self {
            Self::Character(sheet) => &sheet.slots,
            Self::Recruit(sheet) => &sheet.slots,
        }
    }
}

/// A record together with the inventory it owns.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub sheet: Sheet,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

impl SheetRecord {
    pub fn character(id: impl Into<String>, sheet: CharacterSheet) -> Self {
        Self {
            id: RecordId::new(id),
            name: String::new(),
            sheet: Sheet::Character(sheet),
            items: Vec::new(),
        }
    }

    pub fn recruit(id: impl Into<String>, sheet: RecruitSheet) -> Self {
        Self {
            id: RecordId::new(id),
            name: String::new(),
            sheet: Sheet::Recruit(sheet),
            items: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = StoredItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.sheet.kind()
    }

    pub fn item(&self, id: &ItemId) -> Option<&StoredItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut StoredItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Applies item patches; patches for unknown items are returned.
    pub fn apply_item_patches<'a>(
        &mut self,
        patches: impl IntoIterator<Item = &'a ItemPatch>,
    ) -> Vec<ItemId> {
        let mut missing = Vec::new();
        for patch in patches {
            match self.item_mut(&patch.item_id) {
                Some(item) => item.apply(patch),
                None => missing.push(patch.item_id.clone()),
            }
        }
        missing
    }

    /// Applies a scalar patch to the stored base fields.
    pub fn apply_record_patch(&mut self, patch: &RecordPatch) {
        match &mut self.sheet {
            Sheet::Character(sheet) => {
                if let Some(value) = patch.hit_points {
                    sheet.hit_points.value = value;
                }
                if let Some(value) = patch.wounds {
                    sheet.wounds.value = value;
                }
                if let Some(value) = patch.spells {
                    sheet.spells.value = value;
                }
            }
            Sheet::Recruit(sheet) => {
                if let Some(value) = patch.hit_points {
                    sheet.hit_points.value = value;
                }
                if let Some(value) = patch.spells {
                    sheet.spells.value = value;
                }
            }
        }
    }
}

/// Typed write to a record's own scalar fields. `None` leaves a field as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordPatch {
    pub hit_points: Option<i32>,
    pub wounds: Option<i32>,
    pub spells: Option<i32>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.hit_points.is_none() && self.wounds.is_none() && self.spells.is_none()
    }
}
