// Exercise the range-fill engine and override semantics against an
// in-memory SQLite database, the same schema the gateway runs on.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use rota_roster::pattern::cycle_label;
use rota_roster::{RosterEngine, RosterError, ShiftStore, ShiftType};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn fresh_store() -> Arc<ShiftStore> {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    rota_roster::db::init_db(&conn).unwrap();
    Arc::new(ShiftStore::new(conn))
}

#[test]
fn single_day_fill_uses_cycle_start() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    let report = engine.generate(date("2025-03-10"), date("2025-03-10")).unwrap();
    assert_eq!(report.generated, 1);

    let record = store.get(date("2025-03-10")).unwrap().unwrap();
    assert_eq!(record.work_type, cycle_label(0));
    assert_eq!(record.changed_work_type, None);
}

#[test]
fn inverted_range_fills_nothing() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    let report = engine.generate(date("2025-03-10"), date("2025-03-01")).unwrap();
    assert_eq!(report.generated, 0);
    assert!(store.list(None).unwrap().is_empty());
}

#[test]
fn full_cycle_lands_in_order() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    let report = engine.generate(date("2025-01-01"), date("2025-01-21")).unwrap();
    assert_eq!(report.generated, 21);

    let records = store.list(None).unwrap();
    assert_eq!(records.len(), 21);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.work_type, cycle_label(i), "day {i}");
    }
    // seven day shifts, then night/off alternating
    assert_eq!(records[0].work_type, ShiftType::Day);
    assert_eq!(records[6].work_type, ShiftType::Day);
    assert_eq!(records[7].work_type, ShiftType::Night);
    assert_eq!(records[8].work_type, ShiftType::Off);
    assert_eq!(records[20].work_type, ShiftType::Off);
}

#[test]
fn second_run_generates_nothing() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    engine.generate(date("2025-01-01"), date("2025-01-21")).unwrap();
    let before = store.list(None).unwrap();

    let report = engine.generate(date("2025-01-01"), date("2025-01-21")).unwrap();
    assert_eq!(report.generated, 0);

    let after = store.list(None).unwrap();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.work_type, b.work_type);
    }
}

#[test]
fn pre_existing_date_is_skipped_without_shifting_the_cycle() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    // manual record three days into the range, with a label the cycle would
    // never put there
    store
        .create(date("2025-01-04"), ShiftType::Off, None)
        .unwrap();

    let report = engine.generate(date("2025-01-01"), date("2025-01-07")).unwrap();
    assert_eq!(report.generated, 6);

    // the manual record survives untouched
    let manual = store.get(date("2025-01-04")).unwrap().unwrap();
    assert_eq!(manual.work_type, ShiftType::Off);

    // the day after the gap still gets the label for offset 4: the skipped
    // date consumed its cycle slot
    let after_gap = store.get(date("2025-01-05")).unwrap().unwrap();
    assert_eq!(after_gap.work_type, cycle_label(4));
}

#[test]
fn large_range_spans_batches() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    // 250 days forces two full flushes plus a remainder
    let report = engine.generate(date("2025-01-01"), date("2025-09-07")).unwrap();
    assert_eq!(report.generated, 250);

    let records = store.list(None).unwrap();
    assert_eq!(records.len(), 250);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.work_type, cycle_label(i), "day {i}");
    }
}

#[test]
fn cancelled_fill_stops_between_dates() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));

    let cancel = AtomicBool::new(true);
    let report = engine
        .generate_with_cancel(date("2025-01-01"), date("2025-01-21"), &cancel)
        .unwrap();
    assert_eq!(report.generated, 0);
    assert!(store.list(None).unwrap().is_empty());
}

#[test]
fn override_keeps_the_original_assignment() {
    let store = fresh_store();
    let engine = RosterEngine::new(Arc::clone(&store));
    engine.generate(date("2025-01-01"), date("2025-01-07")).unwrap();

    let updated = store
        .set_override(date("2025-01-03"), ShiftType::Night)
        .unwrap();
    assert_eq!(updated.work_type, ShiftType::Day);
    assert_eq!(updated.changed_work_type, Some(ShiftType::Night));

    // a rerun does not disturb the overridden record
    engine.generate(date("2025-01-01"), date("2025-01-07")).unwrap();
    let record = store.get(date("2025-01-03")).unwrap().unwrap();
    assert_eq!(record.changed_work_type, Some(ShiftType::Night));
}

#[test]
fn override_of_missing_date_is_not_found() {
    let store = fresh_store();

    let err = store
        .set_override(date("2030-06-01"), ShiftType::Day)
        .unwrap_err();
    assert!(matches!(err, RosterError::NotFound { .. }));
    assert!(store.get(date("2030-06-01")).unwrap().is_none());
}

#[test]
fn duplicate_create_is_a_conflict() {
    let store = fresh_store();

    store.create(date("2025-05-01"), ShiftType::Day, None).unwrap();
    let err = store
        .create(date("2025-05-01"), ShiftType::Night, None)
        .unwrap_err();
    assert!(matches!(err, RosterError::Conflict { .. }));

    // the first record is unchanged
    let record = store.get(date("2025-05-01")).unwrap().unwrap();
    assert_eq!(record.work_type, ShiftType::Day);
}

#[test]
fn range_read_is_sorted_and_inclusive() {
    let store = fresh_store();

    // insert out of order
    for (d, t) in [
        ("2025-02-05", ShiftType::Off),
        ("2025-02-01", ShiftType::Day),
        ("2025-02-03", ShiftType::Night),
        ("2025-02-10", ShiftType::Day),
    ] {
        store.create(date(d), t, None).unwrap();
    }

    let records = store
        .list(Some((date("2025-02-01"), date("2025-02-05"))))
        .unwrap();
    let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, ["2025-02-01", "2025-02-03", "2025-02-05"]);
}
