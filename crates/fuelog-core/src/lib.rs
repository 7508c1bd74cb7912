//! Core logic for fuelog
//!
//! This crate contains:
//! - Efficiency policies (consecutive records, full tank to full tank)
//! - Aggregate statistics over the store
//! - The export/import contract
//! - The tracker that owns the record store
//! - The frontend collaborator trait and the command controller

mod backup;
mod controller;
mod efficiency;
mod frontend;
mod mock;
mod stats;
mod tracker;

pub use backup::*;
pub use controller::*;
pub use efficiency::*;
pub use frontend::*;
pub use mock::*;
pub use stats::*;
pub use tracker::*;

use fuelog_store::StoreError;
use thiserror::Error;

/// Errors terminal to a single command
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid backup file: {0}")]
    InvalidFormat(String),

    #[error("There are no records to export")]
    EmptyExport,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Frontend error: {0}")]
    Frontend(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn frontend(msg: impl Into<String>) -> Self {
        Self::Frontend(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
