//! Rest rules.

use crate::state::{RecordPatch, Sheet};

/// How restful the stop was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestKind {
    /// Hit points back to max, spent spells recovered.
    Standard,
    /// A standard rest that also heals one wound.
    SafeHaven,
}

/// Patch that applies a rest to `sheet`.
///
/// Recruits only recover hit points. The patch writes base fields; the next
/// derivation pass recomputes everything that depends on them.
pub fn rest(sheet: &Sheet, kind: RestKind) -> RecordPatch {
    match sheet {
        Sheet::Character(sheet) => {
            let wounds = match kind {
                RestKind::Standard => None,
                RestKind::SafeHaven => Some((sheet.wounds.value + 1).min(sheet.wounds.max)),
            };
            RecordPatch {
                hit_points: Some(sheet.hit_points.max),
                wounds,
                spells: Some(0),
            }
        }
        Sheet::Recruit(sheet) => RecordPatch {
            hit_points: Some(sheet.hit_points.max),
            ..RecordPatch::default()
        },
    }
}
