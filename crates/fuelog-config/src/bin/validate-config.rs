//! Checks a fuelog configuration file and prints the settings it resolves to.
//!
//! Usage: `validate-config [config-file]`. Without an argument the default
//! config location is checked; a missing default file is reported as
//! "using defaults" rather than an error.

use fuelog_config::{ConfigError, Settings, load_config};
use fuelog_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let path = explicit.clone().unwrap_or_else(default_config_path);

    if !path.exists() {
        if explicit.is_some() {
            eprintln!("{}: no such file", path.display());
            return ExitCode::from(1);
        }
        println!("{}: not present, using defaults", path.display());
        print_settings(&Settings::default());
        return ExitCode::SUCCESS;
    }

    match load_config(&path) {
        Ok(settings) => {
            println!("{}: ok", path.display());
            print_settings(&settings);
            ExitCode::SUCCESS
        }
        Err(ConfigError::ValidationFailed { errors }) => {
            eprintln!("{}: {} problem(s)", path.display(), errors.len());
            for error in errors {
                eprintln!("  {}", error);
            }
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            ExitCode::from(1)
        }
    }
}

fn print_settings(settings: &Settings) {
    let rows = [
        ("database", settings.storage.database_path().display().to_string()),
        ("key", settings.storage.key.clone()),
        ("policy", format!("{:?}", settings.efficiency.policy)),
        ("legacy fills", format!("{:?}", settings.efficiency.legacy_fills)),
        ("efficiency unit", settings.display.efficiency_unit()),
        ("currency", settings.display.currency.clone()),
    ];

    for (name, value) in rows {
        println!("  {:<16}{}", name, value);
    }
}
