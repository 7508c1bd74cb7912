//! The record store: an ordered sequence of fuel records persisted as a
//! full JSON snapshot under a single key.

use fuelog_api::FuelRecord;
use fuelog_util::RecordId;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{KeyValueStore, StoreError, StoreResult};

/// Insertion-ordered fuel records backed by a key-value store.
///
/// Every mutation rewrites the whole snapshot; there are no incremental writes.
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    records: Vec<FuelRecord>,
}

impl RecordStore {
    /// Load the records persisted under `key`.
    ///
    /// A missing key yields an empty store. Unreadable JSON is logged and also
    /// yields an empty store; only backend failures are returned.
    pub fn load(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();

        let records = match backend.get(&key)? {
            None => {
                debug!(key = %key, "No persisted records");
                Vec::new()
            }
            Some(json) => match decode_records(&key, &json) {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt record snapshot");
                    Vec::new()
                }
            },
        };

        info!(key = %key, count = records.len(), "Records loaded");

        Ok(Self {
            backend,
            key,
            records,
        })
    }

    /// Records in storage (insertion) order
    pub fn records(&self) -> &[FuelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&FuelRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Largest ID currently stored
    pub fn max_id(&self) -> Option<RecordId> {
        self.records.iter().map(|r| r.id).max()
    }

    /// Records newest first by date; same-date records newest ID first
    pub fn sorted_by_date_desc(&self) -> Vec<FuelRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by_key(|r| Reverse((r.date, r.id)));
        sorted
    }

    /// Append a record and persist
    pub fn append(&mut self, record: FuelRecord) -> StoreResult<()> {
        let id = record.id;
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)?;
        debug!(record_id = %id, count = self.records.len(), "Record appended");
        Ok(())
    }

    /// Remove the record with `id` and persist.
    ///
    /// Returns whether anything was removed. An absent ID performs no write.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<bool> {
        let next: Vec<FuelRecord> = self.records.iter().filter(|r| r.id != id).cloned().collect();

        if next.len() == self.records.len() {
            debug!(record_id = %id, "Remove ignored, no such record");
            return Ok(false);
        }

        self.commit(next)?;
        debug!(record_id = %id, count = self.records.len(), "Record removed");
        Ok(true)
    }

    /// Overwrite every record and persist
    pub fn replace_all(&mut self, records: Vec<FuelRecord>) -> StoreResult<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            warn!(record_id = %dup.id, "Replacement contains duplicate record IDs");
        }

        self.commit(records)?;
        info!(count = self.records.len(), "Records replaced");
        Ok(())
    }

    /// Write the full record sequence to the backend
    pub fn snapshot(&self) -> StoreResult<()> {
        self.write(&self.records)
    }

    /// Persist `next`, then adopt it. A failed write keeps the current records.
    fn commit(&mut self, next: Vec<FuelRecord>) -> StoreResult<()> {
        self.write(&next)?;
        self.records = next;
        Ok(())
    }

    fn write(&self, records: &[FuelRecord]) -> StoreResult<()> {
        let json = serde_json::to_string(records)?;
        self.backend.set(&self.key, &json)
    }
}

/// Decode a persisted snapshot (a bare JSON array of records)
pub fn decode_records(key: &str, json: &str) -> StoreResult<Vec<FuelRecord>> {
    serde_json::from_str(json).map_err(|e| StoreError::PersistenceCorrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
