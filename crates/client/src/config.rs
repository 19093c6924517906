//! Client settings read from the environment and command line.
use std::env;
use std::path::PathBuf;

/// Where the client finds its inputs.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// TOML configuration registry. Defaults apply when unset.
    pub config_path: Option<PathBuf>,
    /// Record to derive, `.json` or `.ron`.
    pub record_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from the process environment.
    ///
    /// The first command-line argument overrides `SHEET_RECORD`.
    ///
    /// Environment variables:
    /// - `SHEET_CONFIG` - Path to the configuration TOML (optional)
    /// - `SHEET_RECORD` - Path to the record file
    pub fn from_env() -> Self {
        let mut config = Self {
            config_path: read_env::<PathBuf>("SHEET_CONFIG"),
            record_path: read_env::<PathBuf>("SHEET_RECORD"),
        };

        if let Some(path) = env::args_os().nth(1) {
            config.record_path = Some(PathBuf::from(path));
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
