// Tests for writing and reloading launch tables

use chrono::NaiveDate;
use liftoff_core::config::DataPaths;
use liftoff_core::loader::{load, load_named};
use liftoff_core::{DataError, LaunchTable};
use liftoff_scanner::{Horizon, LaunchDetail, LaunchRecord, LaunchSummary, MissionOutcome};
use std::collections::BTreeSet;
use std::fs;

fn launch(id: u64, date: (i32, u32, u32), site: &str, details: &[(&str, &str)], outcome: MissionOutcome) -> LaunchRecord {
    let mut detail = LaunchDetail::empty(id);
    for (label, value) in details {
        detail.insert(*label, *value);
    }
    detail.outcome = outcome;
    LaunchRecord {
        summary: LaunchSummary {
            id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title_1: "Long March 2D".to_string(),
            title_2: Some("Yaogan 36".to_string()),
            company: "CASC".to_string(),
            site: site.to_string(),
            link: format!("/launches/details/{}", id),
        },
        detail,
    }
}

fn sample() -> Vec<LaunchRecord> {
    vec![
        launch(
            6001,
            (2022, 10, 15),
            "Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China",
            &[("Price", "$30 million"), ("Rocket Height", "41 m")],
            MissionOutcome::Success,
        ),
        launch(
            12,
            (1967, 11, 9),
            "LC-39A, Kennedy Space Center, Florida, USA",
            &[("Liftoff Thrust", "34,020 kN")],
            MissionOutcome::Failure,
        ),
        launch(13, (1957, 10, 4), "Baikonur", &[], MissionOutcome::Unknown),
    ]
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_then_load_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    let table = LaunchTable::from_records(sample());

    table.save(&paths.table(Horizon::Past)).unwrap();
    let loaded = load(&paths, Horizon::Past).unwrap();

    assert_eq!(loaded.len(), table.len());
    let written: BTreeSet<u64> = table.ids().collect();
    let read: BTreeSet<u64> = loaded.ids().collect();
    assert_eq!(written, read);
    assert_eq!(loaded.detail_columns(), table.detail_columns());
}

#[test]
fn test_loaded_values_are_typed() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    LaunchTable::from_records(sample())
        .save(&paths.table(Horizon::Future))
        .unwrap();

    let loaded = load_named(&paths, "Future").unwrap();
    let first = &loaded.records()[0];
    assert_eq!(first.summary.date, NaiveDate::from_ymd_opt(2022, 10, 15).unwrap());
    assert_eq!(first.detail.get("Price"), Some("$30 million"));
    assert_eq!(first.detail.get("Liftoff Thrust"), None);
    assert_eq!(first.detail.outcome, MissionOutcome::Success);

    let last = &loaded.records()[2];
    assert!(last.detail.is_empty());
    assert_eq!(last.detail.outcome, MissionOutcome::Unknown);
}

#[test]
fn test_save_replaces_previous_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = DataPaths::new(dir.path()).table(Horizon::Past);
    fs::write(&path, "stale contents").unwrap();

    LaunchTable::from_records(sample()).save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,date,title_1,title_2,company,site,link,"));
    assert!(!text.contains("stale"));
}

#[test]
fn test_empty_table_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    LaunchTable::default().save(&paths.table(Horizon::Past)).unwrap();

    let loaded = load(&paths, Horizon::Past).unwrap();
    assert!(loaded.is_empty());
    assert!(loaded.detail_columns().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_load_named_rejects_unknown_horizon() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_named(&DataPaths::new(dir.path()), "yesterday").unwrap_err();
    assert!(matches!(err, DataError::InvalidHorizon(_)));
}

#[test]
fn test_load_rejects_non_numeric_id() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    fs::write(
        paths.table(Horizon::Past),
        "id,date,title_1,title_2,company,site,link,status\nabc,2020-01-01,a,b,c,d,e,1\n",
    )
    .unwrap();

    let err = load(&paths, Horizon::Past).unwrap_err();
    assert!(matches!(err, DataError::InvalidValue { column: "id", .. }));
}
