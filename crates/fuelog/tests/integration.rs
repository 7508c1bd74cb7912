//! Integration tests for fuelog
//!
//! These drive the controller against a SQLite file the way the binary
//! does, reopening the database to check what was persisted.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use fuelog_api::{
    Command, CommandOutcome, EfficiencyPolicy, ErrorCode, FillInput, FullTank, LegacyFillPolicy,
    OutcomePayload, STORAGE_KEY,
};
use fuelog_config::Settings;
use fuelog_core::{Controller, FuelTracker, ScriptedFrontend};
use fuelog_store::{KeyValueStore, SqliteStore};
use fuelog_util::RecordId;
use std::path::Path;
use std::sync::Arc;

fn settings(policy: EfficiencyPolicy, legacy_fills: LegacyFillPolicy) -> Settings {
    let mut settings = Settings::default();
    settings.efficiency.policy = policy;
    settings.efficiency.legacy_fills = legacy_fills;
    settings
}

fn open(db: &Path, settings: &Settings, frontend: ScriptedFrontend) -> Controller<ScriptedFrontend> {
    let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(db).unwrap());
    let tracker = FuelTracker::open(backend, settings).unwrap();
    Controller::new(tracker, frontend)
}

fn fill(date: (i32, u32, u32), odometer: f64, fuel_amount: f64, price: i64, full: bool) -> FillInput {
    FillInput {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        odometer,
        fuel_amount,
        price,
        is_full_tank: full,
    }
}

fn at(ms: i64) -> DateTime<Local> {
    Local.timestamp_millis_opt(ms).unwrap()
}

fn added(outcome: CommandOutcome) -> fuelog_api::FuelRecord {
    match outcome {
        CommandOutcome::Ok(OutcomePayload::Added { record }) => record,
        other => panic!("expected Added, got {:?}", other),
    }
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);

    let first = {
        let mut c = open(&db, &settings, ScriptedFrontend::new());
        c.frontend_mut().queue_form(fill((2024, 5, 1), 1000.0, 40.0, 6000, true));
        added(c.dispatch_at(Command::SubmitForm, at(1_700_000_000_000)))
    };

    assert_eq!(first.id, RecordId::new(1_700_000_000_000));
    assert_eq!(first.price_per_liter, 150);
    assert!(first.fuel_efficiency.is_none());

    let c = open(&db, &settings, ScriptedFrontend::new());
    assert_eq!(c.tracker().records(), &[first]);
}

#[test]
fn consecutive_policy_uses_previous_entry() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::Consecutive, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new());

    added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 5, 1), 1000.0, 40.0, 6400, true) },
        at(1_000),
    ));
    let second = added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 5, 15), 1400.0, 35.0, 5600, true) },
        at(2_000),
    ));

    assert_eq!(second.fuel_efficiency, Some(11.43));

    // Odometer went backwards
    let third = added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 5, 20), 1300.0, 10.0, 1600, true) },
        at(3_000),
    ));
    assert!(third.fuel_efficiency.is_none());
}

#[test]
fn full_tank_policy_accumulates_partials() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new());

    added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 1), 10000.0, 5.0, 800, true) },
        at(1_000),
    ));
    let partial = added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 5), 10300.0, 10.0, 1600, false) },
        at(2_000),
    ));
    let closing = added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 9), 10600.0, 20.0, 3200, true) },
        at(3_000),
    ));

    assert!(partial.fuel_efficiency.is_none());
    assert_eq!(closing.fuel_efficiency, Some(20.0));

    let stats = c.frontend().last_stats().unwrap();
    assert_eq!(stats.record_count, 3);
    assert_eq!(stats.average_efficiency, Some(20.0));
    assert_eq!(stats.best_efficiency, Some(20.0));
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new());

    let record = added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 1), 500.0, 30.0, 4500, true) },
        at(1_000),
    ));

    let outcome = c.dispatch(Command::Delete { id: RecordId::new(42) });
    assert!(matches!(
        outcome,
        CommandOutcome::Ok(OutcomePayload::Deleted { removed: false, .. })
    ));
    assert_eq!(c.tracker().records().len(), 1);

    c.dispatch(Command::Delete { id: record.id });
    drop(c);

    let c = open(&db, &settings, ScriptedFrontend::new());
    assert!(c.tracker().records().is_empty());
}

#[test]
fn invalid_import_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new().confirming(true));

    added(c.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 1), 500.0, 30.0, 4500, true) },
        at(1_000),
    ));

    for contents in ["not json", r#"{"version": "1.0"}"#, r#"{"records": {}}"#] {
        let outcome = c.dispatch(Command::Import { contents: contents.into() });
        assert_eq!(outcome.error().unwrap().code, ErrorCode::InvalidFormat);
    }

    assert!(c.frontend().confirm_requests.is_empty());
    assert_eq!(c.frontend().import_resets, 3);
    assert_eq!(c.tracker().records().len(), 1);
}

#[test]
fn export_then_import_restores_records() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);

    let source_db = dir.path().join("source.db");
    let mut source = open(&source_db, &settings, ScriptedFrontend::new());
    source.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 1), 10000.0, 5.0, 800, true) },
        at(1_000),
    );
    source.dispatch_at(
        Command::AddFill { input: fill((2024, 6, 9), 10600.0, 30.0, 4800, true) },
        at(2_000),
    );

    let outcome = source.dispatch_at(
        Command::Export,
        Local.from_utc_datetime(&NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(12, 0, 0).unwrap()),
    );
    assert!(matches!(
        outcome,
        CommandOutcome::Ok(OutcomePayload::Exported { record_count: 2, .. })
    ));

    let file = source.frontend().delivered[0].clone();
    assert_eq!(file.file_name, "fuel-records-2024-06-10.json");
    assert_eq!(source.frontend().last_notice(), Some("Exported 2 records to fuel-records-2024-06-10.json"));

    let document: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
    assert_eq!(document["version"], "1.0");
    assert_eq!(document["exportDate"], "2024-06-10T12:00:00.000Z");

    let target_db = dir.path().join("target.db");
    let mut target = open(&target_db, &settings, ScriptedFrontend::new().confirming(true));
    target.dispatch_at(
        Command::AddFill { input: fill((2023, 1, 1), 1.0, 1.0, 1, true) },
        at(500),
    );

    let outcome = target.dispatch(Command::Import { contents: file.contents });
    assert!(matches!(
        outcome,
        CommandOutcome::Ok(OutcomePayload::Imported { record_count: 2 })
    ));
    assert_eq!(target.frontend().confirm_requests, vec![2]);
    assert_eq!(target.tracker().records(), source.tracker().records());
    drop(target);

    let reopened = open(&target_db, &settings, ScriptedFrontend::new());
    assert_eq!(reopened.tracker().records(), source.tracker().records());
}

#[test]
fn legacy_records_without_fill_flag() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let legacy = r#"{
        "records": [
            {"id": 1, "date": "2023-03-01", "odometer": 2000, "fuelAmount": 40,
             "price": 6000, "pricePerLiter": 150, "fuelEfficiency": null}
        ]
    }"#;

    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new().confirming(true));
    c.dispatch(Command::Import { contents: legacy.into() });

    let record = &c.tracker().records()[0];
    assert_eq!(record.is_full_tank, FullTank::Unrecorded);
    assert!(c.tracker().is_full_tank(record));

    // The legacy fill anchors the next full-tank computation
    let next = added(c.dispatch_at(
        Command::AddFill { input: fill((2023, 3, 20), 2500.0, 25.0, 4000, true) },
        at(1_700_000_000_000),
    ));
    assert_eq!(next.fuel_efficiency, Some(20.0));

    // Unrecorded stays unrecorded on disk
    let raw = SqliteStore::open(&db).unwrap().get(STORAGE_KEY).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(stored[0].get("isFullTank").is_none());
    assert_eq!(stored[1]["isFullTank"], true);
}

#[test]
fn legacy_records_treated_as_partial() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let legacy = r#"{"records": [{"id": 1, "date": "2023-03-01", "odometer": 2000,
        "fuelAmount": 40, "price": 6000, "pricePerLiter": 150}]}"#;

    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumePartial);
    let mut c = open(&db, &settings, ScriptedFrontend::new().confirming(true));
    c.dispatch(Command::Import { contents: legacy.into() });
    assert!(!c.tracker().is_full_tank(&c.tracker().records()[0]));

    let next = added(c.dispatch_at(
        Command::AddFill { input: fill((2023, 3, 20), 2500.0, 25.0, 4000, true) },
        at(1_700_000_000_000),
    ));
    assert!(next.fuel_efficiency.is_none());
}

#[test]
fn empty_store_export_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fuelog.db");
    let settings = settings(EfficiencyPolicy::FullTank, LegacyFillPolicy::AssumeFull);
    let mut c = open(&db, &settings, ScriptedFrontend::new());

    let outcome = c.dispatch(Command::Export);
    assert_eq!(outcome.error().unwrap().code, ErrorCode::EmptyExport);
    assert!(c.frontend().delivered.is_empty());
}
