//! The fuel tracker: owns the record store and applies the efficiency policy

use chrono::{DateTime, TimeZone};
use fuelog_api::{FillInput, FuelRecord, FuelSummary, FullTank};
use fuelog_config::{EfficiencySettings, Settings};
use fuelog_store::{KeyValueStore, RecordStore};
use fuelog_util::RecordId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    CoreError, CoreResult, ExportFile, FillReading, ImportPlan, NotComputable, build_export,
    evaluate, parse_import, price_per_liter, summarize,
};

/// Single owner of the fuel log
pub struct FuelTracker {
    store: RecordStore,
    efficiency: EfficiencySettings,
}

impl FuelTracker {
    pub fn new(store: RecordStore, efficiency: EfficiencySettings) -> Self {
        info!(
            records = store.len(),
            policy = ?efficiency.policy,
            legacy_fills = ?efficiency.legacy_fills,
            "Tracker initialized"
        );

        Self { store, efficiency }
    }

    /// Load the store named by `settings` from `backend`
    pub fn open(backend: Arc<dyn KeyValueStore>, settings: &Settings) -> CoreResult<Self> {
        let store = RecordStore::load(backend, settings.storage.key.clone())?;
        Ok(Self::new(store, settings.efficiency))
    }

    /// Records in storage order
    pub fn records(&self) -> &[FuelRecord] {
        self.store.records()
    }

    /// Records newest first, for display
    pub fn sorted_records(&self) -> Vec<FuelRecord> {
        self.store.sorted_by_date_desc()
    }

    pub fn summary(&self) -> FuelSummary {
        summarize(self.store.records())
    }

    /// Whether a record counts as a full-tank fill, legacy records included
    pub fn is_full_tank(&self, record: &FuelRecord) -> bool {
        record.is_full_tank(self.efficiency.legacy_fills)
    }

    /// Efficiency a fill would get if it were recorded now
    pub fn preview_efficiency(&self, fill: &FillReading) -> Result<f64, NotComputable> {
        evaluate(
            self.efficiency.policy,
            self.store.records(),
            fill,
            self.efficiency.legacy_fills,
        )
    }

    /// Record a new fill-up.
    ///
    /// Efficiency is computed against the store before the append.
    pub fn add_fill<Tz: TimeZone>(&mut self, input: FillInput, now: &DateTime<Tz>) -> CoreResult<FuelRecord> {
        validate_fill(&input)?;

        let reading = FillReading {
            odometer: input.odometer,
            fuel_amount: input.fuel_amount,
            full_tank: input.is_full_tank,
        };

        let fuel_efficiency = match self.preview_efficiency(&reading) {
            Ok(efficiency) => Some(efficiency),
            Err(reason) => {
                debug!(%reason, "Efficiency not computable");
                None
            }
        };

        let record = FuelRecord {
            id: self.allocate_id(now)?,
            date: input.date,
            odometer: input.odometer,
            fuel_amount: input.fuel_amount,
            price: input.price,
            is_full_tank: FullTank::from(input.is_full_tank),
            price_per_liter: price_per_liter(input.price, input.fuel_amount),
            fuel_efficiency,
        };

        self.store.append(record.clone())?;

        info!(
            record_id = %record.id,
            odometer = record.odometer,
            efficiency = ?record.fuel_efficiency,
            "Fill recorded"
        );

        Ok(record)
    }

    /// Delete a record; absent IDs are not an error
    pub fn delete(&mut self, id: RecordId) -> CoreResult<bool> {
        let removed = self.store.remove(id)?;
        if removed {
            info!(record_id = %id, "Record deleted");
        }
        Ok(removed)
    }

    pub fn export<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> CoreResult<ExportFile> {
        build_export(self.store.records(), now)
    }

    /// Validate a backup document without touching the store
    pub fn prepare_import(&self, contents: &str) -> CoreResult<ImportPlan> {
        parse_import(contents)
    }

    /// Overwrite the store with a confirmed import
    pub fn apply_import(&mut self, plan: ImportPlan) -> CoreResult<usize> {
        let count = plan.records.len();
        self.store.replace_all(plan.records)?;
        info!(count, "Import applied");
        Ok(count)
    }

    /// Creation timestamp, bumped past the largest stored ID on collision.
    ///
    /// When the largest ID is `i64::MAX`, the nearest free ID below the
    /// timestamp is used instead.
    fn allocate_id<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> CoreResult<RecordId> {
        let candidate = RecordId::from_timestamp(now);
        if self.store.get(candidate).is_none() {
            return Ok(candidate);
        }

        if let Some(next) = self.store.max_id().and_then(|max| max.checked_next()) {
            return Ok(next);
        }

        let taken: HashSet<RecordId> = self.store.records().iter().map(|r| r.id).collect();
        (i64::MIN..candidate.as_i64())
            .rev()
            .map(RecordId::new)
            .find(|id| !taken.contains(id))
            .ok_or_else(|| CoreError::invalid_input("no free record ID"))
    }
}

fn validate_fill(input: &FillInput) -> CoreResult<()> {
    if !input.odometer.is_finite() || input.odometer < 0.0 {
        return Err(CoreError::invalid_input(format!(
            "odometer must be a non-negative number, got {}",
            input.odometer
        )));
    }
    if !input.fuel_amount.is_finite() || input.fuel_amount <= 0.0 {
        return Err(CoreError::invalid_input(format!(
            "fuel amount must be greater than zero, got {}",
            input.fuel_amount
        )));
    }
    if input.price < 0 {
        return Err(CoreError::invalid_input(format!(
            "price cannot be negative, got {}",
            input.price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use fuelog_api::{EfficiencyPolicy, LegacyFillPolicy, STORAGE_KEY};
    use fuelog_store::MemoryStore;

    fn tracker(policy: EfficiencyPolicy) -> FuelTracker {
        let backend = Arc::new(MemoryStore::new());
        let store = RecordStore::load(backend, STORAGE_KEY).unwrap();
        FuelTracker::new(
            store,
            EfficiencySettings {
                policy,
                legacy_fills: LegacyFillPolicy::AssumeFull,
            },
        )
    }

    fn input(odometer: f64, fuel_amount: f64, price: i64, full: bool) -> FillInput {
        FillInput {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            odometer,
            fuel_amount,
            price,
            is_full_tank: full,
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn first_fill_has_no_efficiency() {
        let mut t = tracker(EfficiencyPolicy::Consecutive);
        let record = t.add_fill(input(1000.0, 40.0, 6400, true), &at(1_000)).unwrap();

        assert!(record.fuel_efficiency.is_none());
        assert_eq!(record.price_per_liter, 160);
        assert_eq!(record.id, RecordId::new(1_000));
        assert_eq!(record.is_full_tank, FullTank::Full);
    }

    #[test]
    fn consecutive_policy_end_to_end() {
        let mut t = tracker(EfficiencyPolicy::Consecutive);
        t.add_fill(input(1000.0, 40.0, 6400, true), &at(1_000)).unwrap();
        let second = t.add_fill(input(1400.0, 35.0, 5600, true), &at(2_000)).unwrap();

        assert_eq!(second.fuel_efficiency, Some(11.43));
        assert_eq!(t.records().len(), 2);
    }

    #[test]
    fn full_tank_policy_end_to_end() {
        let mut t = tracker(EfficiencyPolicy::FullTank);
        t.add_fill(input(10000.0, 5.0, 800, true), &at(1_000)).unwrap();
        let partial = t.add_fill(input(10300.0, 10.0, 1600, false), &at(2_000)).unwrap();
        let closing = t.add_fill(input(10600.0, 20.0, 3200, true), &at(3_000)).unwrap();

        assert!(partial.fuel_efficiency.is_none());
        assert_eq!(partial.is_full_tank, FullTank::Partial);
        assert_eq!(closing.fuel_efficiency, Some(20.0));
    }

    #[test]
    fn colliding_timestamps_get_unique_ids() {
        let mut t = tracker(EfficiencyPolicy::FullTank);
        let a = t.add_fill(input(100.0, 10.0, 1000, true), &at(5_000)).unwrap();
        let b = t.add_fill(input(200.0, 10.0, 1000, true), &at(5_000)).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(b.id, RecordId::new(5_001));
    }

    #[test]
    fn collision_with_max_id_picks_free_id_below() {
        let mut t = tracker(EfficiencyPolicy::FullTank);
        let imported = |id: i64| FuelRecord {
            id: RecordId::new(id),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            odometer: 100.0,
            fuel_amount: 10.0,
            price: 1000,
            is_full_tank: FullTank::Full,
            price_per_liter: 100,
            fuel_efficiency: None,
        };
        t.apply_import(ImportPlan {
            records: vec![imported(i64::MAX), imported(5_000), imported(4_999)],
            version: None,
        })
        .unwrap();

        let record = t.add_fill(input(200.0, 10.0, 1000, true), &at(5_000)).unwrap();
        assert_eq!(record.id, RecordId::new(4_998));
        assert_eq!(t.records().len(), 4);
    }

    #[test]
    fn invalid_input_is_rejected_without_mutation() {
        let mut t = tracker(EfficiencyPolicy::FullTank);

        for bad in [
            input(-1.0, 10.0, 100, true),
            input(f64::NAN, 10.0, 100, true),
            input(100.0, 0.0, 100, true),
            input(100.0, -5.0, 100, true),
            input(100.0, 10.0, -1, true),
        ] {
            let result = t.add_fill(bad, &at(1_000));
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }
        assert!(t.records().is_empty());
    }

    #[test]
    fn delete_and_summary() {
        let mut t = tracker(EfficiencyPolicy::Consecutive);
        let first = t.add_fill(input(1000.0, 40.0, 6400, true), &at(1_000)).unwrap();
        t.add_fill(input(1400.0, 40.0, 6400, true), &at(2_000)).unwrap();

        let summary = t.summary();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.average_efficiency, Some(10.0));

        assert!(t.delete(first.id).unwrap());
        assert!(!t.delete(first.id).unwrap());
        assert_eq!(t.summary().record_count, 1);
    }

    #[test]
    fn legacy_records_display_as_full_by_default() {
        let t = tracker(EfficiencyPolicy::FullTank);
        let legacy = FuelRecord {
            id: RecordId::new(1),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            odometer: 0.0,
            fuel_amount: 1.0,
            price: 1,
            is_full_tank: FullTank::Unrecorded,
            price_per_liter: 1,
            fuel_efficiency: None,
        };
        assert!(t.is_full_tank(&legacy));
    }
}
