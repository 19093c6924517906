//! Sheet configuration loader.

use std::path::Path;

use sheet_core::SheetConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for the configuration registry from TOML files.
///
/// Missing keys fall back to [`SheetConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SheetConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SheetConfig> {
        let config: SheetConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            automatic_level = false
            coins_per_slot = 0
            "#,
        )
        .unwrap();

        assert!(!config.automatic_level);
        assert!(config.automatic_slots);
        assert_eq!(config.coins_per_slot, 0);
        assert_eq!(config.arrows_per_slot, SheetConfig::DEFAULT_ARROWS_PER_SLOT);
        assert_eq!(config.xp_per_level, SheetConfig::DEFAULT_XP_PER_LEVEL);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = ConfigLoader::parse("enforce_integer_slots = \"yes\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/sheet.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sheet.toml"));
    }
}
