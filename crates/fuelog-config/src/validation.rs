//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("[{section}] {field} cannot be empty")]
    EmptyField {
        section: &'static str,
        field: &'static str,
    },

    #[error("[storage] database '{0}' must be a file name, not a path")]
    DatabaseIsPath(String),
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let storage = &config.storage;
    check_not_blank(&mut errors, "storage", "key", storage.key.as_deref());
    check_not_blank(&mut errors, "storage", "database", storage.database.as_deref());

    if let Some(database) = &storage.database
        && (database.contains('/') || database.contains('\\'))
    {
        errors.push(ValidationError::DatabaseIsPath(database.clone()));
    }

    let display = &config.display;
    check_not_blank(&mut errors, "display", "distance_unit", display.distance_unit.as_deref());
    check_not_blank(&mut errors, "display", "volume_unit", display.volume_unit.as_deref());
    check_not_blank(&mut errors, "display", "currency", display.currency.as_deref());

    errors
}

// Absent values fall back to defaults; only explicitly blank ones are rejected.
fn check_not_blank(
    errors: &mut Vec<ValidationError>,
    section: &'static str,
    field: &'static str,
    value: Option<&str>,
) {
    if let Some(v) = value
        && v.trim().is_empty()
    {
        errors.push(ValidationError::EmptyField { section, field });
    }
}
