//! Content factory for loading sheet data from a directory.

use std::path::{Path, PathBuf};

use sheet_core::{SheetConfig, SheetRecord};

use crate::loaders::{ConfigLoader, LevelTableLoader, LoadResult, RecordLoader};

/// Content factory that loads sheet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── levels.json      (optional, overrides xp_per_level)
/// └── records/
///     ├── hero.ron
///     └── porter.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from `config.toml`, with `levels.json` replacing
    /// the breakpoint table when present.
    pub fn load_config(&self) -> LoadResult<SheetConfig> {
        let mut config = ConfigLoader::load(&self.data_dir.join("config.toml"))?;

        let levels = self.data_dir.join("levels.json");
        if levels.exists() {
            config = config.with_xp_per_level(LevelTableLoader::load_raw(&levels)?);
        }

        Ok(config)
    }

    /// Load every record under `records/`.
    pub fn load_records(&self) -> LoadResult<Vec<SheetRecord>> {
        RecordLoader::load_dir(&self.data_dir.join("records"))
    }

    /// Load one record by file name from `records/`.
    pub fn load_record(&self, file_name: &str) -> LoadResult<SheetRecord> {
        RecordLoader::load(&self.data_dir.join("records").join(file_name))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn level_file_overrides_config_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "enforce_integer_slots = true\n").unwrap();
        let levels = r#"{"1": {"xp": 0, "label": "One"}}"#;
        std::fs::write(dir.path().join("levels.json"), levels).unwrap();

        let config = ContentFactory::new(dir.path()).load_config().unwrap();
        assert!(config.enforce_integer_slots);
        assert_eq!(config.xp_per_level, levels);
    }
}
