use healthlog_core::{
    CsvFileStore, EntryTimestamp, EventCategory, EventRow, EventStore, Severity,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> CsvFileStore {
    CsvFileStore::new(dir.path().join("journal.csv"))
}

fn row(ts: &str, name: &str, category: EventCategory, severity: u8, note: &str) -> EventRow {
    EventRow {
        timestamp: EntryTimestamp::parse(ts).unwrap(),
        event_name: name.to_string(),
        category,
        severity: Severity::new(severity).unwrap(),
        note: note.to_string(),
    }
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn rewrite_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let rows = vec![
        row("2025-03-14 09:26", "Fatigue", EventCategory::Symptom, 7, "slept badly"),
        row("2025-03-15 18:00", "Stress", EventCategory::Trigger, 4, ""),
    ];
    store.rewrite(&rows).unwrap();

    assert_eq!(store.load().unwrap(), rows);
}

#[test]
fn append_preserves_existing_rows_and_writes_header_once() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let first = vec![row("2025-03-14 09:26", "Fatigue", EventCategory::Symptom, 7, "a")];
    let second = vec![row("2025-03-15 18:00", "Heat", EventCategory::Trigger, 3, "b")];
    store.append(&first).unwrap();
    store.append(&second).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], first[0]);
    assert_eq!(loaded[1], second[0]);

    let raw = fs::read_to_string(store.path()).unwrap();
    let header_count = raw
        .lines()
        .filter(|line| line.starts_with("Date,"))
        .count();
    assert_eq!(header_count, 1);
}

#[test]
fn rewrite_replaces_previous_contents_completely() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .append(&[row("2025-03-14 09:26", "Fatigue", EventCategory::Symptom, 7, "")])
        .unwrap();
    let replacement = vec![row("2025-03-16 07:00", "Tingling", EventCategory::Symptom, 2, "")];
    store.rewrite(&replacement).unwrap();

    assert_eq!(store.load().unwrap(), replacement);
}

#[test]
fn rewrite_leaves_no_staging_file_behind() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .rewrite(&[row("2025-03-14 09:26", "Fatigue", EventCategory::Symptom, 7, "")])
        .unwrap();

    let leftovers: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path != &store.path().to_path_buf())
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[test]
fn malformed_rows_are_dropped_and_valid_rows_survive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.csv");
    fs::write(
        &path,
        "Date,Event,Type,Severity,Notes\n\
         2025-03-14 09:26,Fatigue,Symptom,7,ok\n\
         never-a-date,Stress,Trigger,4,bad row\n\
         2025-03-15 18:00,Heat,Trigger,3,also ok\n",
    )
    .unwrap();

    let loaded = CsvFileStore::new(path).load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].event_name, "Fatigue");
    assert_eq!(loaded[1].event_name, "Heat");
}

#[test]
fn legacy_twelve_hour_rows_load_and_canonicalize() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.csv");
    fs::write(
        &path,
        "Date,Event,Type,Severity,Notes\n\
         03/14/2025 09:26 PM,Fatigue,Symptom,7,from the old app\n",
    )
    .unwrap();

    let loaded = CsvFileStore::new(path).load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].timestamp.to_string(), "2025-03-14 21:26");
}

#[test]
fn notes_with_commas_quotes_and_newlines_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let rows = vec![row(
        "2025-03-14 09:26",
        "MS Hug (Chest Tightness)",
        EventCategory::Symptom,
        9,
        "worse after \"hot\" bath,\nthen stairs",
    )];
    store.rewrite(&rows).unwrap();

    assert_eq!(store.load().unwrap(), rows);
}

#[test]
fn unknown_type_value_loads_as_other() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.csv");
    fs::write(
        &path,
        "Date,Event,Type,Severity,Notes\n\
         2025-03-14 09:26,Fatigue,Sympton,7,typo in type\n",
    )
    .unwrap();

    let loaded = CsvFileStore::new(path).load().unwrap();
    assert_eq!(loaded[0].category, EventCategory::Other);
}

#[test]
fn out_of_range_severity_drops_only_that_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.csv");
    fs::write(
        &path,
        "Date,Event,Type,Severity,Notes\n\
         2025-03-14 09:26,Fatigue,Symptom,99,impossible\n\
         2025-03-15 18:00,Heat,Trigger,3,fine\n",
    )
    .unwrap();

    let loaded = CsvFileStore::new(path).load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].event_name, "Heat");
}

#[test]
fn write_failure_surfaces_storage_error() {
    let dir = TempDir::new().unwrap();
    let store = CsvFileStore::new(dir.path().join("no-such-dir").join("journal.csv"));

    let err = store
        .append(&[row("2025-03-14 09:26", "Fatigue", EventCategory::Symptom, 7, "")])
        .unwrap_err();
    assert!(err.to_string().contains("failed to write store file"));
}
