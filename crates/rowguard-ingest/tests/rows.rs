//! Tests for CSV, JSON and spreadsheet row sources.

use std::fs;
use std::path::{Path, PathBuf};

use rowguard_ingest::{IngestError, read_rows};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn csv_pairs_headers_with_cells() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "people.csv",
        "name,email,phone\nAda, ada@example.com ,5551234567\n\nGrace,grace@example.com,\n",
    );

    let rows = read_rows(&path).expect("read rows");
    assert_eq!(rows.len(), 2, "blank lines are skipped");
    assert_eq!(rows[0].get("name"), Some("Ada"));
    assert_eq!(rows[0].get("email"), Some(" ada@example.com "), "cells are not trimmed");
    assert_eq!(rows[1].get("phone"), Some(""));
    let keys: Vec<&str> = rows[0].iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["name", "email", "phone"]);
}

#[test]
fn csv_short_records_leave_keys_absent() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "ragged.csv", "a,b,c\n1\n1,2,3,4\n");

    let rows = read_rows(&path).expect("read rows");
    assert_eq!(rows[0].len(), 1);
    assert!(!rows[0].contains_key("b"));
    assert_eq!(rows[1].len(), 3, "extra cells are dropped");
    assert_eq!(rows[1].get("c"), Some("3"));
}

#[test]
fn csv_with_only_a_header_has_no_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "empty.csv", "name,email\n");
    assert!(read_rows(&path).expect("read rows").is_empty());
}

#[test]
fn json_array_of_objects_becomes_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "people.json",
        r#"[{"name": "Ada", "age": 36, "active": true}, {"name": "Grace", "note": null}]"#,
    );

    let rows = read_rows(&path).expect("read rows");
    assert_eq!(rows.len(), 2);
    let keys: Vec<&str> = rows[0].iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["name", "age", "active"], "source key order is kept");
    assert_eq!(rows[0].get("age"), Some("36"));
    assert_eq!(rows[0].get("active"), Some("true"));
    assert_eq!(rows[1].get("note"), Some("null"));
    assert!(!rows[1].contains_key("age"));
}

#[test]
fn json_must_be_an_array_of_objects() {
    let dir = TempDir::new().expect("temp dir");
    let object = write(dir.path(), "object.json", r#"{"name": "Ada"}"#);
    let scalars = write(dir.path(), "scalars.json", "[1, 2]");
    let broken = write(dir.path(), "broken.json", "[{");

    assert!(matches!(
        read_rows(&object),
        Err(IngestError::MalformedRows { .. })
    ));
    assert!(matches!(
        read_rows(&scalars),
        Err(IngestError::MalformedRows { .. })
    ));
    assert!(matches!(read_rows(&broken), Err(IngestError::Json { .. })));
}

#[test]
fn spreadsheet_first_sheet_becomes_rows() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/people.xlsx");

    let rows = read_rows(&path).expect("read workbook");
    assert_eq!(rows.len(), 2, "blank rows are skipped");

    let keys: Vec<&str> = rows[0].iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["name", "age", "joined", "active", "email"]);
    assert_eq!(rows[0].get("name"), Some("Ada"));
    assert_eq!(rows[0].get("age"), Some("36"));
    assert_eq!(rows[0].get("joined"), Some("2024-03-05"));
    assert_eq!(rows[0].get("active"), Some("true"));

    assert_eq!(rows[1].get("name"), Some("Grace"));
    assert_eq!(rows[1].get("age"), Some(""), "empty cells read as empty strings");
    assert_eq!(rows[1].get("joined"), Some(""));
    assert_eq!(rows[1].get("active"), Some("false"));
    assert_eq!(rows[1].get("email"), Some("grace@example.com"));
}

#[test]
fn corrupt_spreadsheet_is_a_spreadsheet_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "broken.xlsx", "not a zip archive");

    let err = read_rows(&path).expect_err("corrupt workbook");
    assert!(matches!(err, IngestError::Spreadsheet { .. }));
}

#[test]
fn unsupported_extension_fails_before_reading() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("table.parquet");

    let err = read_rows(&missing).expect_err("parquet is unsupported");
    assert!(matches!(err, IngestError::UnsupportedInput { .. }));
    assert!(err.to_string().contains("parquet"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_rows(&dir.path().join("missing.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::Io { .. }));
}
