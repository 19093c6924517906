/// Registry of recognized sheet options.
///
/// Every option is read-only to the rules; the host owns the values and
/// exposes them through [`crate::env::ConfigOracle`], which this type
/// implements directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Derive `blessings.max` from charisma.
    pub automatic_blessings: bool,
    /// Derive `companions.max` from charisma.
    pub automatic_companions: bool,
    /// Derive `wounds.max` from constitution.
    pub automatic_wounds: bool,
    /// Derive `slots.max` from constitution and the wound deficit.
    pub automatic_slots: bool,
    /// Derive `spells.max` from intelligence.
    pub automatic_spells: bool,
    /// Resolve level and label from experience.
    pub automatic_level: bool,

    /// Coins per slot of capacity. Zero disables the contribution.
    pub coins_per_slot: u32,
    /// Arrows per slot of capacity. Zero disables the contribution.
    pub arrows_per_slot: u32,
    /// Sling bullets per slot of capacity. Zero disables the contribution.
    pub bullets_per_slot: u32,

    /// Ceil-round reported slot totals instead of rounding to two decimals.
    pub enforce_integer_slots: bool,

    /// Serialized level breakpoint table: `{"<level>": {"xp": n, "label": s}}`.
    pub xp_per_level: String,
}

impl SheetConfig {
    // ===== rule constants =====
    /// Base carrying capacity before constitution and wound deficit.
    pub const BASE_SLOTS: i32 = 10;
    /// Base wound pool before constitution.
    pub const BASE_WOUNDS: i32 = 10;
    /// Lowest hit point value a character can be pushed to before overflow.
    pub const CHARACTER_HP_FLOOR: i32 = -999;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COINS_PER_SLOT: u32 = 100;
    pub const DEFAULT_ARROWS_PER_SLOT: u32 = 20;
    pub const DEFAULT_BULLETS_PER_SLOT: u32 = 20;
    pub const DEFAULT_XP_PER_LEVEL: &'static str = r#"{
        "1": {"xp": 0, "label": "Level 1"},
        "2": {"xp": 2000, "label": "Level 2"},
        "3": {"xp": 4000, "label": "Level 3"},
        "4": {"xp": 6000, "label": "Level 4"},
        "5": {"xp": 8000, "label": "Level 5"},
        "6": {"xp": 10000, "label": "Level 6"},
        "7": {"xp": 12000, "label": "Level 7"},
        "8": {"xp": 14000, "label": "Level 8"},
        "9": {"xp": 16000, "label": "Level 9"},
        "10": {"xp": 18000, "label": "Level 10"}
    }"#;

    pub fn new() -> Self {
        Self {
            automatic_blessings: true,
            automatic_companions: true,
            automatic_wounds: true,
            automatic_slots: true,
            automatic_spells: true,
            automatic_level: true,
            coins_per_slot: Self::DEFAULT_COINS_PER_SLOT,
            arrows_per_slot: Self::DEFAULT_ARROWS_PER_SLOT,
            bullets_per_slot: Self::DEFAULT_BULLETS_PER_SLOT,
            enforce_integer_slots: false,
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL.to_owned(),
        }
    }

    /// Configuration with every automatic derivation switched off.
    pub fn manual() -> Self {
        Self {
            automatic_blessings: false,
            automatic_companions: false,
            automatic_wounds: false,
            automatic_slots: false,
            automatic_spells: false,
            automatic_level: false,
            ..Self::new()
        }
    }

    pub fn with_xp_per_level(mut self, table: impl Into<String>) -> Self {
        self.xp_per_level = table.into();
        self
    }

    pub fn with_enforce_integer_slots(mut self, enforce: bool) -> Self {
        self.enforce_integer_slots = enforce;
        self
    }

    pub fn with_slot_rates(mut self, coins: u32, arrows: u32, bullets: u32) -> Self {
        self.coins_per_slot = coins;
        self.arrows_per_slot = arrows;
        self.bullets_per_slot = bullets;
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How reported slot totals are rounded once the solver has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundingPolicy {
    /// Ceil both `value` and `max` to whole slots.
    IntegerSlots,
    /// Round `value` to two decimal places, leave `max` untouched.
    Hundredths,
}

impl RoundingPolicy {
    pub fn from_enforce_integer(enforce: bool) -> Self {
        if enforce {
            Self::IntegerSlots
        } else {
            Self::Hundredths
        }
    }

    /// Returns the rounded `(value, max)` pair.
    pub fn apply(self, value: f64, max: f64) -> (f64, f64) {
        match self {
            Self::IntegerSlots => (value.ceil(), max.ceil()),
            Self::Hundredths => ((value * 100.0).round() / 100.0, max),
        }
    }
}

/// Per-unit conversion rates for resources that consume capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotRates {
    pub coins: u32,
    pub arrows: u32,
    pub bullets: u32,
}

impl SlotRates {
    /// Capacity consumed by `count` units at `per_slot` units per slot.
    pub fn slots_for(count: u32, per_slot: u32) -> f64 {
        if per_slot == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(per_slot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_policy_ceils_both_totals() {
        let (value, max) = RoundingPolicy::IntegerSlots.apply(7.05, 9.5);
        assert_eq!(value, 8.0);
        assert_eq!(max, 10.0);
    }

    #[test]
    fn hundredths_policy_only_touches_value() {
        let (value, max) = RoundingPolicy::Hundredths.apply(7.0549, 9.555);
        assert_eq!(value, 7.05);
        assert_eq!(max, 9.555);
    }

    #[test]
    fn zero_rate_contributes_nothing() {
        assert_eq!(SlotRates::slots_for(500, 0), 0.0);
        assert_eq!(SlotRates::slots_for(50, 100), 0.5);
    }

    #[test]
    fn manual_config_keeps_rates() {
        let config = SheetConfig::manual();
        assert!(!config.automatic_level);
        assert_eq!(config.coins_per_slot, SheetConfig::DEFAULT_COINS_PER_SLOT);
    }
}
