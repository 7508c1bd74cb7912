//! Data contract for fuelog
//!
//! This crate defines the types shared between the store, the core and
//! any frontend:
//! - Fuel records and the tri-state full-tank flag
//! - The backup (export/import) envelope
//! - Commands a frontend issues and their outcomes

mod commands;
mod types;

pub use commands::*;
pub use types::*;

/// Storage key holding the JSON-encoded record array
pub const STORAGE_KEY: &str = "fuelRecords";

/// Version tag written into every export
pub const BACKUP_FORMAT_VERSION: &str = "1.0";
