//! Store trait definitions

use crate::StoreResult;

/// Single-key string storage.
///
/// Each `set` replaces the whole value atomically; callers never rely on
/// partial updates.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Check if the backend is usable
    fn is_healthy(&self) -> bool;
}
