//! Shared utilities for fuelog
//!
//! This crate provides:
//! - ID types (RecordId)
//! - Time utilities (mockable wall-clock, date formatting)
//! - Default paths for config and data directories

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
