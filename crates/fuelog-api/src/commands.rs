//! Command types a frontend issues against the tracker

use fuelog_util::RecordId;
use serde::{Deserialize, Serialize};

use crate::{FillInput, FuelRecord};

/// All commands a frontend can issue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Read the fill-up form through the frontend and record it
    SubmitForm,

    /// Record a fill-up from already-parsed input
    AddFill { input: FillInput },

    /// Delete a record by ID (no-op if absent)
    Delete { id: RecordId },

    /// Export all records as a backup file
    Export,

    /// Replace all records with the contents of a backup file
    Import { contents: String },

    /// Re-render list and statistics without changing anything
    Refresh,
}

/// Outcome of a command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Ok(OutcomePayload),
    Err(ErrorInfo),
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandOutcome::Ok(_))
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            CommandOutcome::Ok(_) => None,
            CommandOutcome::Err(e) => Some(e),
        }
    }
}

/// Successful outcome payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomePayload {
    Added { record: FuelRecord },
    Deleted { id: RecordId, removed: bool },
    Exported { file_name: String, record_count: usize },
    Imported { record_count: usize },
    /// The user declined the destructive overwrite; nothing changed
    ImportDeclined { record_count: usize },
    Refreshed,
}

/// Error information surfaced to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidFormat,
    EmptyExport,
    InvalidInput,
    StorageError,
    FrontendError,
}
