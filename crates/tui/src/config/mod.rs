use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/debts.toml";
const ENV_PREFIX: &str = "DEBTS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file holding the ledger.
    pub data_file: String,
    /// Append-only log file.
    pub log_file: String,
    /// Level used for both crates (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: "balances.csv".to_string(),
            log_file: "balances.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Loads the configuration from the default TOML file (if any), then lets
/// `DEBTS_*` environment variables override it.
pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

fn load_from(config_path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
    let settings: AppConfig = builder.build()?.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.data_file, "balances.csv");
        assert_eq!(settings.log_file, "balances.log");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn file_overrides_defaults_field_by_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("debts.toml");
        fs::write(&path, "data_file = \"/tmp/ledger.csv\"\n").unwrap();
        let settings = load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.data_file, "/tmp/ledger.csv");
        assert_eq!(settings.log_file, "balances.log");
    }
}
