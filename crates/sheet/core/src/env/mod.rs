//! Traits describing read-only host configuration.
//!
//! The derivation rules never reach for ambient settings. Everything they need
//! arrives through [`ConfigOracle`], so hosts can back it with a settings
//! store, a loaded file, or a fixed [`SheetConfig`] in tests.

use crate::config::{RoundingPolicy, SheetConfig, SlotRates};

/// Provides access to the configuration registry.
pub trait ConfigOracle: Send + Sync {
    fn automatic_blessings(&self) -> bool;

    fn automatic_companions(&self) -> bool;

    fn automatic_wounds(&self) -> bool;

    fn automatic_slots(&self) -> bool;

    fn automatic_spells(&self) -> bool;

    fn automatic_level(&self) -> bool;

    /// Units of each capacity-consuming resource per slot.
    fn slot_rates(&self) -> SlotRates;

    fn enforce_integer_slots(&self) -> bool;

    /// Raw serialized level breakpoint table.
    fn level_breakpoints(&self) -> &str;

    /// Rounding applied to reported slot totals.
    fn rounding(&self) -> RoundingPolicy {
        RoundingPolicy::from_enforce_integer(self.enforce_integer_slots())
    }
}

impl ConfigOracle for SheetConfig {
    fn automatic_blessings(&self) -> bool {
        self.automatic_blessings
    }

    fn automatic_companions(&self) -> bool {
        self.automatic_companions
    }

    fn automatic_wounds(&self) -> bool {
        self.automatic_wounds
    }

    fn automatic_slots(&self) -> bool {
        self.automatic_slots
    }

    fn automatic_spells(&self) -> bool {
        self.automatic_spells
    }

    fn automatic_level(&self) -> bool {
        self.automatic_level
    }

    fn slot_rates(&self) -> SlotRates {
        SlotRates {
            coins: self.coins_per_slot,
            arrows: self.arrows_per_slot,
            bullets: self.bullets_per_slot,
        }
    }

    fn enforce_integer_slots(&self) -> bool {
        self.enforce_integer_slots
    }

    fn level_breakpoints(&self) -> &str {
        &self.xp_per_level
    }
}
