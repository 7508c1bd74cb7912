//! Configuration parsing and validation for fuelog
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Storage location (data directory, database file, record key)
//! - Efficiency policy and how legacy records are read
//! - Display unit labels
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    load_config(path)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelog_api::{EfficiencyPolicy, LegacyFillPolicy};
    use std::path::PathBuf;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings.storage.key, "fuelRecords");
        assert_eq!(settings.efficiency.policy, EfficiencyPolicy::FullTank);
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [storage]
            data_dir = "/srv/fuelog"
            database = "car.db"
            key = "carRecords"

            [efficiency]
            policy = "consecutive"
            legacy_fills = "partial"

            [display]
            distance_unit = "mi"
            volume_unit = "gal"
            currency = "$"
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.storage.database_path(), PathBuf::from("/srv/fuelog/car.db"));
        assert_eq!(settings.storage.key, "carRecords");
        assert_eq!(settings.efficiency.policy, EfficiencyPolicy::Consecutive);
        assert_eq!(settings.efficiency.legacy_fills, LegacyFillPolicy::AssumePartial);
        assert_eq!(settings.display.efficiency_unit(), "mi/gal");
        assert_eq!(settings.display.currency, "$");
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_unknown_policy() {
        let config = r#"
            config_version = 1
            [efficiency]
            policy = "weekly"
        "#;
        assert!(matches!(parse_config(config), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn reject_blank_key() {
        let config = r#"
            config_version = 1
            [storage]
            key = ""
        "#;
        assert!(matches!(
            parse_config(config),
            Err(ConfigError::ValidationFailed { errors }) if errors.len() == 1
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.storage.key, "fuelRecords");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_version = 1\n[efficiency]\npolicy = \"consecutive\"\n").unwrap();

        let settings = load_config_or_default(&path).unwrap();
        assert_eq!(settings.efficiency.policy, EfficiencyPolicy::Consecutive);
    }
}
