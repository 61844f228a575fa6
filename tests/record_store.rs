use std::fs;

use student_manager::error::{StoreError, ValidationError};
use student_manager::models::{StudentForm, Summary};
use student_manager::records::RecordStore;
use student_manager::utils::student_id_number;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> RecordStore {
    RecordStore::open(dir.path().join("marks.json"))
}

fn form(name: &str, mark: &str) -> StudentForm {
    StudentForm::new(name, "Grade 10", "Maths", mark)
}

#[test]
fn test_ids_increase_across_deletes() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let a = store.add(&form("Anna", "50")).unwrap();
    let b = store.add(&form("Bob", "60")).unwrap();
    let c = store.add(&form("Cara", "70")).unwrap();
    assert_eq!((a.id.as_str(), b.id.as_str(), c.id.as_str()), ("STD001", "STD002", "STD003"));

    store.delete("STD003").unwrap();
    let d = store.add(&form("Dan", "80")).unwrap();
    assert_eq!(d.id, "STD004");

    store.delete("STD001").unwrap();
    let e = store.add(&form("Eve", "90")).unwrap();
    assert_eq!(e.id, "STD005");

    let numbers: Vec<u64> = store
        .records()
        .iter()
        .map(|r| student_id_number(&r.id).unwrap())
        .collect();
    assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    assert!(store.records().iter().all(|r| r.id.len() == 6 && r.id.starts_with("STD")));
}

#[test]
fn test_ids_continue_from_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"[{"ID": "STD041", "name": "Old", "grade": "9", "subject": "Art", "mark": 40}]"#,
    )
    .unwrap();

    let mut store = RecordStore::open(&path);
    let added = store.add(&form("New", "55")).unwrap();
    assert_eq!(added.id, "STD042");
}

#[test]
fn test_add_rejects_invalid_input_without_mutation() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();
    let before = store.records().to_vec();

    let cases = [
        (form("Bob", "101"), ValidationError::InvalidMark("101".to_string())),
        (form("Bob", "-5"), ValidationError::InvalidMark("-5".to_string())),
        (form("Bob", "ninety"), ValidationError::InvalidMark("ninety".to_string())),
        (form("  ", "50"), ValidationError::MissingField("name")),
        (StudentForm::new("Bob", "", "Maths", "50"), ValidationError::MissingField("grade")),
        (StudentForm::new("Bob", "10", "", "50"), ValidationError::MissingField("subject")),
    ];
    for (bad, expected) in cases {
        match store.add(&bad) {
            Err(StoreError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    assert_eq!(store.records(), before.as_slice());
    assert_eq!(RecordStore::open(store.path()).records(), before.as_slice());
    assert_eq!(store.next_id().as_deref(), Some("STD002"));
}

#[test]
fn test_update_overwrites_fields_in_place() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();
    store.add(&form("Bob", "60")).unwrap();

    let updated = store
        .update("STD001", &StudentForm::new("Anna Lee", "Grade 11", "Physics", " 75 "))
        .unwrap();

    assert_eq!(updated.id, "STD001");
    assert_eq!(updated.name, "Anna Lee");
    assert_eq!(updated.subject, "Physics");
    assert_eq!(updated.mark, 75);
    assert_eq!(store.records()[0], updated);

    let reopened = RecordStore::open(store.path());
    assert_eq!(reopened.records()[0].name, "Anna Lee");
    assert_eq!(reopened.records()[1].name, "Bob");
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();
    let before = store.records().to_vec();

    let err = store.update("STD999", &form("Ghost", "10")).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(ref id) if id == "STD999"));
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn test_update_with_bad_mark_keeps_record() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();

    let err = store.update("STD001", &form("Anna", "250")).unwrap_err();

    assert!(matches!(err, StoreError::Validation(ValidationError::InvalidMark(_))));
    assert_eq!(store.get("STD001").unwrap().mark, 50);
}

#[test]
fn test_delete_removes_exactly_one() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    for (name, mark) in [("Anna", "50"), ("Bob", "60"), ("Cara", "70")] {
        store.add(&form(name, mark)).unwrap();
    }

    let removed = store.delete("STD002").unwrap();

    assert_eq!(removed.name, "Bob");
    let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["STD001", "STD003"]);
    assert_eq!(RecordStore::open(store.path()).len(), 2);
}

#[test]
fn test_delete_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();

    let err = store.delete("STD404").unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_search_is_case_insensitive_and_ordered() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let anna = store.add(&form("Anna", "50")).unwrap();
    store.add(&form("bob", "60")).unwrap();
    let annie = store.add(&form("Annie", "70")).unwrap();

    assert_eq!(store.search_by_name("an"), vec![anna.id.clone(), annie.id]);
    assert_eq!(store.search_by_name("ANNA"), vec![anna.id]);
    assert!(store.search_by_name("zed").is_empty());
}

#[test]
fn test_summary() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    assert_eq!(
        store.summary(),
        Summary { count: 0, average: 0.0, max: 0, min: 0 }
    );

    for (name, mark) in [("A", "50"), ("B", "70"), ("C", "90")] {
        store.add(&form(name, mark)).unwrap();
    }
    assert_eq!(
        store.summary(),
        Summary { count: 3, average: 70.0, max: 90, min: 50 }
    );

    store.add(&form("D", "0")).unwrap();
    let summary = store.summary();
    assert_eq!(summary.average, 52.5);
    assert_eq!(summary.min, 0);
}

#[test]
fn test_summary_rounds_average() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    for (name, mark) in [("A", "100"), ("B", "100"), ("C", "0")] {
        store.add(&form(name, mark)).unwrap();
    }
    assert_eq!(store.summary().average, 66.67);
}

#[test]
fn test_summary_average_ties_round_to_even() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("A", "71")).unwrap();
    for i in 0..7 {
        store.add(&form(&format!("B{i}"), "70")).unwrap();
    }

    let summary = store.summary();
    assert_eq!(summary.count, 8);
    assert_eq!(summary.average, 70.12);
    assert_eq!(summary.average_label(), "70.12");
}

#[test]
fn test_missing_and_corrupt_files_load_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");

    let store = RecordStore::open(&path);
    assert!(store.is_empty());

    fs::write(&path, "[{\"ID\": \"STD001\", \"name\": ").unwrap();
    let mut store = RecordStore::open(&path);
    assert!(store.is_empty());

    let added = store.add(&form("Anna", "50")).unwrap();
    assert_eq!(added.id, "STD001");
    assert_eq!(RecordStore::open(&path).len(), 1);
}

#[test]
fn test_round_trip_keeps_order_and_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"[
    {"ID": "STD002", "name": "Bob", "grade": "9", "subject": "Art", "mark": 61, "notes": "transfer"},
    {"ID": "STD001", "name": "Anna", "grade": "10", "subject": "Maths", "mark": 88}
]"#,
    )
    .unwrap();

    let store = RecordStore::open(&path);
    store.save().unwrap();
    let reloaded = RecordStore::open(&path);

    assert_eq!(reloaded.records(), store.records());
    assert_eq!(reloaded.records()[0].id, "STD002");
    assert_eq!(
        reloaded.records()[0].extra.get("notes").and_then(|v| v.as_str()),
        Some("transfer")
    );
}

#[test]
fn test_saved_file_uses_file_keys() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "88")).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{
            "ID": "STD001",
            "name": "Anna",
            "grade": "Grade 10",
            "subject": "Maths",
            "mark": 88
        }])
    );
    assert!(raw.contains("\n        \"ID\": \"STD001\""));
}

#[test]
fn test_reload_picks_up_external_edits() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.add(&form("Anna", "50")).unwrap();

    let mut other = RecordStore::open(store.path());
    other.add(&form("Bob", "60")).unwrap();

    assert_eq!(store.len(), 1);
    store.reload();
    assert_eq!(store.len(), 2);
    assert_eq!(store.next_id().as_deref(), Some("STD003"));
}

#[test]
fn test_duplicate_ids_on_disk_are_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"[
    {"ID": "STD001", "name": "First", "grade": "1", "subject": "s", "mark": 10},
    {"ID": "STD001", "name": "Second", "grade": "1", "subject": "s", "mark": 20}
]"#,
    )
    .unwrap();

    let mut store = RecordStore::open(&path);
    assert_eq!(store.len(), 2);

    let removed = store.delete("STD001").unwrap();
    assert_eq!(removed.name, "First");
    assert_eq!(store.get("STD001").unwrap().name, "Second");
}

#[test]
fn test_ids_beyond_u32_keep_counting() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"[
    {"ID": "STD4294967295", "name": "Big", "grade": "1", "subject": "s", "mark": 10},
    {"ID": "STD18446744073709551615", "name": "Max", "grade": "1", "subject": "s", "mark": 20}
]"#,
    )
    .unwrap();

    let mut store = RecordStore::open(&path);
    assert_eq!(store.len(), 2);

    let first = store.add(&form("Anna", "50")).unwrap();
    let second = store.add(&form("Bob", "60")).unwrap();

    assert_eq!(first.id, "STD4294967296");
    assert_eq!(second.id, "STD4294967297");
}

#[test]
fn test_one_off_shape_row_drops_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"[
    {"ID": "STD001", "name": "Anna", "grade": "10", "subject": "Maths", "mark": 88},
    {"ID": "STD002", "name": "Bob", "grade": "9", "subject": "Art", "mark": 61.0}
]"#,
    )
    .unwrap();

    let mut store = RecordStore::open(&path);
    assert!(store.is_empty());

    store.add(&form("Cara", "70")).unwrap();
    let reopened = RecordStore::open(&path);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.records()[0].id, "STD001");
}
