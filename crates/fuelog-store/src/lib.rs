//! Persistence layer for fuelog
//!
//! Provides:
//! - A single-key get/set backend trait with SQLite and in-memory implementations
//! - The record store: an ordered record sequence persisted as a full snapshot

mod memory;
mod records;
mod sqlite;
mod traits;

pub use memory::*;
pub use records::*;
pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not encode records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0} lock poisoned")]
    Poisoned(&'static str),

    /// The value under `key` exists but is not a record array
    #[error("records under '{key}' are unreadable: {reason}")]
    PersistenceCorrupt { key: String, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
