//! The derivation pass.
//!
//! A pass reads one stored record and the host configuration and produces the
//! fully derived record together with the item patches needed to bring the
//! store in line with it. Steps run in a fixed order and later steps only read
//! what earlier steps wrote:
//!
//! ```text
//! blessings.max ─► companions.max ─► hit points / wounds ─► level
//!                                                            │
//!                 spells.max ◄─ slots (normalize, solve, round)
//! ```
//!
//! Nothing here performs I/O. Writing the patches is the caller's job.

use crate::config::SheetConfig;
use crate::env::ConfigOracle;
use crate::inventory::{
    CapacityMode, CapacitySolver, CarriedItem, DropOrder, ItemPatch, PatchBatch, StoredItem,
    condition_patch, resource_load,
};
use crate::state::{CharacterSheet, RecordKind, Sheet, SheetRecord};
use crate::stats::{Ability, LevelError, LevelTable, resolve_character, resolve_recruit};

use super::overflow::InventoryStatus;

/// Per-kind behaviour of the pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationProfile {
    pub drop_order: DropOrder,
    /// Whether `slots.max` may be derived from abilities.
    pub derives_slot_budget: bool,
}

impl DerivationProfile {
    pub const CHARACTER: Self = Self {
        drop_order: DropOrder::Recency,
        derives_slot_budget: true,
    };

    pub const RECRUIT: Self = Self {
        drop_order: DropOrder::Manual,
        derives_slot_budget: false,
    };

    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Character => Self::CHARACTER,
            RecordKind::Recruit => Self::RECRUIT,
        }
    }
}

/// Result of one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivation {
    /// The record with every derived field recomputed and patches applied.
    pub record: SheetRecord,
    /// Minimal item writes, at most one per item.
    pub patches: PatchBatch,
    pub inventory: InventoryStatus,
    pub capacity: CapacityMode,
    /// Set when automatic levelling could not use the breakpoint table.
    pub level_error: Option<LevelError>,
}

impl Derivation {
    /// True when the store already holds the derived item state.
    pub fn is_settled(&self) -> bool {
        self.patches.is_empty()
    }
}

struct Reconciled {
    patches: PatchBatch,
    inventory: InventoryStatus,
    capacity: CapacityMode,
    item_load: f64,
}

/// Runs derivation passes against a configuration source.
pub struct DerivationPipeline<'a, C: ConfigOracle + ?Sized> {
    config: &'a C,
}

impl<'a, C: ConfigOracle + ?Sized> DerivationPipeline<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self { config }
    }

    pub fn run(&self, record: &SheetRecord) -> Derivation {
        let profile = DerivationProfile::for_kind(record.kind());
        let mut derived = record.clone();

        let level_error = match &mut derived.sheet {
            Sheet::Character(sheet) => self.character_scalars(sheet),
            Sheet::Recruit(sheet) => {
                sheet.hit_points = resolve_recruit(sheet.hit_points);
                None
            }
        };

        let max = self.slot_budget(&derived.sheet, profile);
        let resources = match &derived.sheet {
            Sheet::Character(sheet) => resource_load(sheet.coins, sheet.ammo, self.config.slot_rates()),
            Sheet::Recruit(sheet) => resource_load(sheet.coins, sheet.ammo, self.config.slot_rates()),
        };

        let reconciled = self.reconcile(&record.items, profile.drop_order, max, resources);
        derived.apply_item_patches(reconciled.patches.iter());

        let (value, max) = self
            .config
            .rounding()
            .apply(reconciled.item_load + resources, max);

        match &mut derived.sheet {
            Sheet::Character(sheet) => {
                sheet.slots.value = value;
                sheet.slots.max = max;
                if self.config.automatic_spells() {
                    sheet.spells.max = sheet.abilities.get(Ability::Intelligence);
                }
            }
            Sheet::Recruit(sheet) => {
                sheet.slots.value = value;
                sheet.slots.max = max;
            }
        }

        Derivation {
            record: derived,
            patches: reconciled.patches,
            inventory: reconciled.inventory,
            capacity: reconciled.capacity,
            level_error,
        }
    }

    /// Blessings, companions, hit points and wounds, then level.
    fn character_scalars(&self, sheet: &mut CharacterSheet) -> Option<LevelError> {
        let charisma = sheet.abilities.get(Ability::Charisma);
        if self.config.automatic_blessings() {
            sheet.blessings.max = charisma;
        }
        if self.config.automatic_companions() {
            sheet.companions.max = charisma;
        }

        if self.config.automatic_wounds() {
            sheet.wounds.max =
                SheetConfig::BASE_WOUNDS + sheet.abilities.get(Ability::Constitution);
        }
        let outcome = resolve_character(
            sheet.hit_points,
            sheet.wounds,
            SheetConfig::CHARACTER_HP_FLOOR,
        );
        sheet.hit_points = outcome.hit_points;
        sheet.wounds = outcome.wounds;

        self.level(sheet)
    }

    fn level(&self, sheet: &mut CharacterSheet) -> Option<LevelError> {
        if !self.config.automatic_level() {
            sheet.xp.progress = 0;
            return None;
        }

        match LevelTable::parse(self.config.level_breakpoints()) {
            Ok(table) => {
                let standing = table.resolve(u64::from(sheet.xp.value));
                sheet.level = standing.level;
                sheet.label = standing.label;
                sheet.xp.progress = standing.progress;
                None
            }
            Err(error) => {
                sheet.xp.progress = 0;
                Some(error)
            }
        }
    }

    /// Budget before rounding. Derived budgets never go below zero.
    fn slot_budget(&self, sheet: &Sheet, profile: DerivationProfile) -> f64 {
        match sheet {
            Sheet::Character(sheet)
                if profile.derives_slot_budget && self.config.automatic_slots() =>
            {
                let max = SheetConfig::BASE_SLOTS + sheet.abilities.get(Ability::Constitution)
                    - sheet.wounds.deficit();
                f64::from(max.max(0))
            }
            other => other.slots().max,
        }
    }

    fn reconcile(
        &self,
        items: &[StoredItem],
        order: DropOrder,
        max: f64,
        resources: f64,
    ) -> Reconciled {
        let mut carried: Vec<CarriedItem> = items.iter().map(CarriedItem::from_stored).collect();
        let had_dropped_before = carried.iter().any(|item| item.state.has_dropped_units());

        let consumption = CapacitySolver::item_load(&carried) + resources;
        let capacity = CapacitySolver::new(order).solve(&mut carried, max, consumption);

        let has_dropped_after = carried.iter().any(|item| item.state.has_dropped_units());
        let item_load = CapacitySolver::item_load(&carried);

        let mut patches = PatchBatch::new();
        for (stored, solved) in items.iter().zip(&carried) {
            let changed = stored.state_diff(&solved.state);
            if !changed.is_empty() {
                patches.push(ItemPatch::state(stored.id.clone(), solved.state, changed));
            }
            if let Some(patch) = condition_patch(stored) {
                patches.push(patch);
            }
        }

        Reconciled {
            patches,
            inventory: InventoryStatus {
                had_dropped_before,
                has_dropped_after,
            },
            capacity,
            item_load,
        }
    }
}

/// Runs one pass with `config`.
pub fn derive<C: ConfigOracle + ?Sized>(record: &SheetRecord, config: &C) -> Derivation {
    DerivationPipeline::new(config).run(record)
}
