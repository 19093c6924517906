//! Level breakpoint table loader.

use std::path::Path;

use sheet_core::LevelTable;

use crate::loaders::{LoadResult, read_file};

/// Loads breakpoint tables stored as `{"<level>": {"xp": n, "label": s}}`.
pub struct LevelTableLoader;

impl LevelTableLoader {
    /// Reads the raw table text, checking that it yields at least one level.
    ///
    /// The raw text is what the configuration registry stores, so this is
    /// what [`sheet_core::SheetConfig::with_xp_per_level`] expects.
    pub fn load_raw(path: &Path) -> LoadResult<String> {
        let content = read_file(path)?;
        LevelTable::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level table {}: {}", path.display(), e))?;
        Ok(content)
    }

    /// Reads and parses a table.
    pub fn load(path: &Path) -> LoadResult<LevelTable> {
        let content = read_file(path)?;
        LevelTable::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level table {}: {}", path.display(), e))
    }
}
