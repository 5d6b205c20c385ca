//! Tests for the template store.

use std::fs;
use std::path::Path;

use rowguard_ingest::{IngestError, TemplateStore, load_schema_file};
use rowguard_model::{ColumnRule, SchemaError};
use tempfile::TempDir;

const EMPLOYEE_TEMPLATE: &str = "\
columns:
  employee_id:
    type: string
    required: true
    pattern: '^E[0-9]{4}$'
  start_date:
    type: date
    format: YYYY-MM-DD
  salary:
    type: number
    min: 0
  notes:
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

#[test]
fn lists_templates_sorted_with_display_names() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "employee-records.yaml", EMPLOYEE_TEMPLATE);
    write(dir.path(), "contacts.json", r#"{"columns": {"email": {"type": "email"}}}"#);
    write(dir.path(), "README.md", "not a template");

    let store = TemplateStore::open(dir.path()).expect("open store");
    let templates = store.list().expect("list templates");

    let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["contacts", "employee-records"]);
    assert_eq!(templates[1].name, "Employee Records");
}

#[test]
fn yaml_is_preferred_when_ids_collide() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "contacts.json", r#"{"columns": {}}"#);
    write(dir.path(), "contacts.yaml", "columns: {}\n");

    let store = TemplateStore::open(dir.path()).expect("open store");
    let templates = store.list().expect("list templates");
    assert_eq!(templates.len(), 1);
    assert_eq!(
        templates[0].path.extension().and_then(|e| e.to_str()),
        Some("yaml")
    );
}

#[test]
fn loads_template_by_id() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "employee-records.yaml", EMPLOYEE_TEMPLATE);

    let store = TemplateStore::open(dir.path()).expect("open store");
    let schema = store.load("employee-records").expect("load template");

    let keys: Vec<&str> = schema.column_keys().collect();
    assert_eq!(keys, ["employee_id", "start_date", "salary", "notes"]);
    let employee_id = schema.get("employee_id").expect("employee_id column");
    assert!(employee_id.required);
    assert!(matches!(employee_id.rule, ColumnRule::String(_)));
    assert!(matches!(
        schema.get("notes").expect("notes column").rule,
        ColumnRule::Untyped
    ));
}

#[test]
fn unknown_and_escaping_ids_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let store = TemplateStore::open(dir.path()).expect("open store");

    assert!(matches!(
        store.load("missing"),
        Err(IngestError::TemplateNotFound { .. })
    ));
    assert!(matches!(
        store.load("../etc/passwd"),
        Err(IngestError::InvalidTemplateId { .. })
    ));
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = TemplateStore::open(dir.path().join("nope")).expect_err("missing dir");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn schema_errors_carry_the_template_path() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "no-columns.yaml", "name: nothing here\n");
    write(
        dir.path(),
        "bad-pattern.yaml",
        "columns:\n  code:\n    type: string\n    pattern: '[unclosed'\n",
    );

    let err = load_schema_file(&dir.path().join("no-columns.yaml")).expect_err("no columns");
    assert!(matches!(
        err,
        IngestError::Schema {
            source: SchemaError::MissingColumns,
            ..
        }
    ));

    let err = load_schema_file(&dir.path().join("bad-pattern.yaml")).expect_err("bad pattern");
    assert!(matches!(
        err,
        IngestError::Schema {
            source: SchemaError::InvalidPattern { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("bad-pattern.yaml"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "broken.yaml", "columns: [unterminated\n");

    let err = load_schema_file(&dir.path().join("broken.yaml")).expect_err("broken yaml");
    assert!(matches!(err, IngestError::Yaml { .. }));
}
