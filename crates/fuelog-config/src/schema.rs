//! Raw configuration schema (as parsed from TOML)

use fuelog_api::{EfficiencyPolicy, LegacyFillPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub efficiency: RawEfficiencyConfig,

    #[serde(default)]
    pub display: RawDisplayConfig,
}

/// Where records are persisted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStorageConfig {
    /// Data directory (default: `$FUELOG_DATA_DIR` or the XDG data dir)
    pub data_dir: Option<PathBuf>,

    /// SQLite file name inside `data_dir`
    pub database: Option<String>,

    /// Key holding the record array
    pub key: Option<String>,
}

/// Efficiency computation settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEfficiencyConfig {
    pub policy: Option<EfficiencyPolicy>,

    /// How records lacking a full-tank flag are interpreted
    pub legacy_fills: Option<LegacyFillPolicy>,
}

/// Unit labels used when rendering. No conversion is performed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDisplayConfig {
    pub distance_unit: Option<String>,
    pub volume_unit: Option<String>,
    pub currency: Option<String>,
}
