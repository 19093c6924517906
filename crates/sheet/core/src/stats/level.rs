//! Level resolution from experience.
//!
//! The breakpoint table is sparse host configuration keyed by level number.
//! Entries with a negative threshold are switched off. The remaining entries
//! are sorted once per pass into a [`LevelTable`], which maps an experience
//! value to a level, its label, and the progress toward the next breakpoint.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, SheetError};

/// Errors raised while building a [`LevelTable`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// No breakpoint with a non-negative threshold remains.
    #[error("no levels configured")]
    NoLevelsConfigured,

    /// The serialized table could not be parsed.
    #[error("invalid level table: {0}")]
    InvalidTable(String),
}

impl SheetError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLevelsConfigured => "LEVEL_NO_LEVELS_CONFIGURED",
            Self::InvalidTable(_) => "LEVEL_INVALID_TABLE",
        }
    }
}

/// One entry of the serialized table, before filtering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawBreakpoint {
    pub xp: i64,
    #[serde(default)]
    pub label: String,
}

/// A usable breakpoint: reaching `xp` experience grants `level`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelBreakpoint {
    pub level: u32,
    pub xp: u64,
    pub label: String,
}

/// Where an experience value lands in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelStanding {
    pub level: u32,
    pub label: String,
    /// Floor-rounded percentage toward the next breakpoint.
    pub progress: i32,
}

/// Breakpoints with non-negative thresholds, sorted ascending by level.
///
/// Never empty: construction fails with [`LevelError::NoLevelsConfigured`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTable {
    entries: Vec<LevelBreakpoint>,
}

impl LevelTable {
    /// Parses the serialized `{"<level>": {"xp": n, "label": s}}` table.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::InvalidTable`] on malformed JSON or a non-numeric
    /// level key, and [`LevelError::NoLevelsConfigured`] if no usable entry
    /// remains.
    pub fn parse(raw: &str) -> Result<Self, LevelError> {
        let table: BTreeMap<String, RawBreakpoint> =
            serde_json::from_str(raw).map_err(|e| LevelError::InvalidTable(e.to_string()))?;

        let mut entries = Vec::with_capacity(table.len());
        for (key, breakpoint) in table {
            let level = key.trim().parse::<u32>().map_err(|_| {
                LevelError::InvalidTable(format!("level key '{key}' is not a number"))
            })?;
            entries.push((level, breakpoint));
        }

        Self::from_breakpoints(entries)
    }

    /// Builds a table from `(level, breakpoint)` pairs in any order.
    pub fn from_breakpoints(
        breakpoints: impl IntoIterator<Item = (u32, RawBreakpoint)>,
    ) -> Result<Self, LevelError> {
        let mut entries: Vec<LevelBreakpoint> = breakpoints
            .into_iter()
            .filter_map(|(level, raw)| {
                u64::try_from(raw.xp).ok().map(|xp| LevelBreakpoint {
                    level,
                    xp,
                    label: raw.label,
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(LevelError::NoLevelsConfigured);
        }
        entries.sort_by_key(|entry| entry.level);

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LevelBreakpoint] {
        &self.entries
    }

    /// Finds the breakpoint pair bracketing `xp`.
    ///
    /// Experience at or past the last threshold pins to the highest level with
    /// full progress. Experience below every bracket stays at the lowest level
    /// with no progress.
    pub fn resolve(&self, xp: u64) -> LevelStanding {
        for pair in self.entries.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.xp <= xp && xp < next.xp {
                let span = (next.xp - current.xp) as f64;
                let progress = ((xp - current.xp) as f64 / span * 100.0).floor() as i32;
                return standing(current, progress);
            }
        }

        match (self.entries.first(), self.entries.last()) {
            (_, Some(last)) if xp >= last.xp => standing(last, 100),
            (Some(first), _) => standing(first, 0),
            _ => LevelStanding {
                level: 0,
                label: String::new(),
                progress: 0,
            },
        }
    }
}

fn standing(entry: &LevelBreakpoint, progress: i32) -> LevelStanding {
    LevelStanding {
        level: entry.level,
        label: entry.label.clone(),
        progress,
    }
}
