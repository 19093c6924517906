//! Numeric pools stored on a record.
//!
//! Pools have a `value` the player spends and a `max` that is either entered
//! by hand or derived from abilities. Only `value` and the hand-entered maxima
//! are inputs; `progress` fields are always recomputed.

/// A bounded pool with a floor-rounded fill percentage (hit points, wounds).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pool {
    pub value: i32,
    pub max: i32,
    pub progress: i32,
}

impl Pool {
    pub fn new(value: i32, max: i32) -> Self {
        Self {
            value,
            max,
            progress: fill_percent(value, max),
        }
    }

    /// Pool filled to its maximum.
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    /// Missing points below `max`.
    pub fn deficit(&self) -> i32 {
        self.max - self.value
    }

    pub(crate) fn refresh_progress(&mut self) {
        self.progress = fill_percent(self.value, self.max);
    }
}

/// A capped counter whose `max` may be derived from an ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Counter {
    pub value: i32,
    pub max: i32,
}

impl Counter {
    pub fn new(value: i32, max: i32) -> Self {
        Self { value, max }
    }
}

/// Experience counter and progress toward the next breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Experience {
    pub value: u32,
    pub progress: i32,
}

impl Experience {
    pub fn new(value: u32) -> Self {
        Self { value, progress: 0 }
    }
}

/// Carrying capacity: `value` is consumption, `max` is the budget.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlotBudget {
    pub value: f64,
    pub max: f64,
}

impl SlotBudget {
    pub const DEFAULT_MAX: f64 = 10.0;

    pub fn new(max: f64) -> Self {
        Self { value: 0.0, max }
    }
}

impl Default for SlotBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX)
    }
}

/// Ammunition counts that consume capacity at configurable rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Ammo {
    pub arrow: u32,
    pub bullet: u32,
}

/// `floor(value / max * 100)`, or 0 when `max` is not positive.
pub fn fill_percent(value: i32, max: i32) -> i32 {
    if max <= 0 {
        return 0;
    }
    (f64::from(value) / f64::from(max) * 100.0).floor() as i32
}
