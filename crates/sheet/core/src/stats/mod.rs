//! Scalar stats of a record.
//!
//! ```text
//! [ Abilities ]          stored, hand-entered
//!      ↓
//! [ Automatic maxima ]   blessings, companions, wounds, spells, slots
//!      ↓
//! [ Hit points/wounds ]  clamp + overflow
//!      ↓
//! [ Level ]              experience through the breakpoint table
//! ```
//!
//! Every function here is pure. Upper layers never read back from lower ones.

pub mod abilities;
pub mod level;
pub mod pools;
pub mod wounds;

pub use abilities::{Abilities, Ability};
pub use level::{LevelBreakpoint, LevelError, LevelStanding, LevelTable, RawBreakpoint};
pub use pools::{Ammo, Counter, Experience, Pool, SlotBudget, fill_percent};
pub use wounds::{WoundOutcome, resolve_character, resolve_recruit};
