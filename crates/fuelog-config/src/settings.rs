//! Validated settings structures

use crate::schema::{RawConfig, RawDisplayConfig, RawEfficiencyConfig, RawStorageConfig};
use fuelog_api::{EfficiencyPolicy, LegacyFillPolicy, STORAGE_KEY};
use std::path::PathBuf;

const DEFAULT_DATABASE: &str = "fuelog.db";

/// Validated settings ready for use by the tracker
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub storage: StorageConfig,
    pub efficiency: EfficiencySettings,
    pub display: DisplayConfig,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            storage: StorageConfig::from_raw(raw.storage),
            efficiency: EfficiencySettings::from_raw(raw.efficiency),
            display: DisplayConfig::from_raw(raw.display),
        }
    }
}

/// Storage location
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub database: String,
    pub key: String,
}

impl StorageConfig {
    fn from_raw(raw: RawStorageConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(fuelog_util::default_data_dir),
            database: raw.database.unwrap_or_else(|| DEFAULT_DATABASE.into()),
            key: raw.key.unwrap_or_else(|| STORAGE_KEY.into()),
        }
    }

    /// Full path of the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::from_raw(RawStorageConfig::default())
    }
}

/// Efficiency computation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EfficiencySettings {
    pub policy: EfficiencyPolicy,
    pub legacy_fills: LegacyFillPolicy,
}

impl EfficiencySettings {
    fn from_raw(raw: RawEfficiencyConfig) -> Self {
        Self {
            policy: raw.policy.unwrap_or_default(),
            legacy_fills: raw.legacy_fills.unwrap_or_default(),
        }
    }
}

/// Unit labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub distance_unit: String,
    pub volume_unit: String,
    pub currency: String,
}

impl DisplayConfig {
    fn from_raw(raw: RawDisplayConfig) -> Self {
        Self {
            distance_unit: raw.distance_unit.unwrap_or_else(|| "km".into()),
            volume_unit: raw.volume_unit.unwrap_or_else(|| "L".into()),
            currency: raw.currency.unwrap_or_else(|| "¥".into()),
        }
    }

    /// Label for efficiency values, e.g. `km/L`
    pub fn efficiency_unit(&self) -> String {
        format!("{}/{}", self.distance_unit, self.volume_unit)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::from_raw(RawDisplayConfig::default())
    }
}
