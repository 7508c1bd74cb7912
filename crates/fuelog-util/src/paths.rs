//! Default locations for the config file and the data directory.
//!
//! Both honour an explicit override variable first, then the XDG base
//! directory, then the conventional directory under `$HOME`.

use std::path::PathBuf;

/// Overrides the config file path
pub const FUELOG_CONFIG_ENV: &str = "FUELOG_CONFIG";

/// Overrides the data directory
pub const FUELOG_DATA_DIR_ENV: &str = "FUELOG_DATA_DIR";

const APP_DIR: &str = "fuelog";

/// `$FUELOG_CONFIG`, else `$XDG_CONFIG_HOME/fuelog/config.toml`,
/// else `~/.config/fuelog/config.toml`
pub fn default_config_path() -> PathBuf {
    env_path(FUELOG_CONFIG_ENV).unwrap_or_else(|| {
        base_dir("XDG_CONFIG_HOME", &[".config"])
            .join(APP_DIR)
            .join("config.toml")
    })
}

/// `$FUELOG_DATA_DIR`, else `$XDG_DATA_HOME/fuelog`, else `~/.local/share/fuelog`
pub fn default_data_dir() -> PathBuf {
    env_path(FUELOG_DATA_DIR_ENV)
        .unwrap_or_else(|| base_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR))
}

/// Non-empty path from an environment variable
fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn base_dir(xdg_var: &str, under_home: &[&str]) -> PathBuf {
    if let Some(dir) = env_path(xdg_var) {
        return dir;
    }

    match env_path("HOME") {
        Some(home) => under_home.iter().fold(home, |path, part| path.join(part)),
        // No home directory at all
        None => std::env::temp_dir(),
    }
}
