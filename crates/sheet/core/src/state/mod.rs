//! Stored records.
//!
//! A [`SheetRecord`] is what the document store hands out: base fields the
//! player edits plus the derived fields of the last pass. The pipeline in
//! [`crate::derive`] never mutates a record in place; it returns a derived
//! copy and the patches that bring the store in line with it.
pub mod record;

pub use record::{
    CharacterSheet, RecordId, RecordKind, RecordPatch, RecruitSheet, Sheet, SheetRecord,
};
