//! Application configuration.
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values afterwards. Every field has a default, so an empty file
//! (or no file at all) gives a working in-memory setup:
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "mtd.db"
//! history_key = "financialRecords"
//!
//! [submission]
//! latency_ms = 1000
//! vat_threshold = 85000
//! period_key = "25A1"
//! rehydrate_history = true
//!
//! [logging]
//! level = "info"
//! file = "mtd.log"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mtd_core::db::{DEFAULT_HISTORY_KEY, StoreConfig};
use mtd_core::SubmissionSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub submission: SubmissionSettings,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
    /// Key the submission history is stored under.
    pub history_key: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            backend: store.backend,
            connection_string: store.connection_string,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

impl StoreSection {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.backend.clone(),
            connection_string: self.connection_string.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Values given on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("Invalid configuration")
    }

    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn apply(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(db) = overrides.db {
            self.store.connection_string = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.log_file.is_some() {
            self.logging.file = overrides.log_file;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.history_key, "financialRecords");
        assert_eq!(config.submission.latency_ms, 1000);
        assert_eq!(config.submission.vat_threshold, dec!(85000));
        assert_eq!(config.submission.period_key, "25A1");
        assert!(config.submission.rehydrate_history);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            backend = "sqlite"
            connection_string = "mtd.db"

            [submission]
            latency_ms = 250
            rehydrate_history = false
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.connection_string, "mtd.db");
        assert_eq!(config.store.history_key, "financialRecords");
        assert_eq!(config.submission.latency_ms, 250);
        assert!(!config.submission.rehydrate_history);
        assert_eq!(config.submission.period_key, "25A1");
    }

    #[test]
    fn vat_threshold_accepts_integer_and_decimal() {
        let whole = AppConfig::from_toml_str("[submission]\nvat_threshold = 90000").unwrap();
        let fractional =
            AppConfig::from_toml_str("[submission]\nvat_threshold = 90000.5").unwrap();

        assert_eq!(whole.submission.vat_threshold, dec!(90000));
        assert_eq!(fractional.submission.vat_threshold, dec!(90000.5));
    }

    #[test]
    fn unknown_value_type_is_an_error() {
        let result = AppConfig::from_toml_str("[submission]\nlatency_ms = \"slow\"");

        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let config = AppConfig::default().apply(ConfigOverrides {
            backend: Some("sqlite".to_string()),
            db: Some(":memory:".to_string()),
            log_level: None,
            log_file: Some(PathBuf::from("mtd.log")),
        });

        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.connection_string, ":memory:");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, Some(PathBuf::from("mtd.log")));
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtd.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = AppConfig::load(Some(Path::new("/no/such/mtd.toml"))).unwrap_err();

        assert!(format!("{err:#}").contains("/no/such/mtd.toml"));
    }
}
