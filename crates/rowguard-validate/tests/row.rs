//! Row validator behavior.

use rowguard_model::{Row, Schema, TemplateDef, Violation};
use rowguard_validate::{ValidatorTable, validate_row};

fn schema(yaml: &str) -> Schema {
    let template: TemplateDef = serde_yaml::from_str(yaml).expect("parse template");
    Schema::from_template(template).expect("valid schema")
}

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs.iter().copied().collect()
}

const EMPLOYEES: &str = r#"
columns:
  name: { type: string, required: true, maxLength: 10 }
  sin: { type: sin, required: true }
  email: { type: email }
  age: { type: number, min: 18, max: 70 }
  nickname: {}
"#;

#[test]
fn valid_row_has_no_errors() {
    let schema = schema(EMPLOYEES);
    let outcome = validate_row(
        &row(&[
            ("name", "Ada"),
            ("sin", "046 454 286"),
            ("email", "ada@example.com"),
            ("age", "36"),
        ]),
        &schema,
        &ValidatorTable::standard(),
    );
    assert!(outcome.is_valid);
    assert!(outcome.errors.is_empty());
}

#[test]
fn missing_required_key_is_reported_without_type_check() {
    let schema = schema(EMPLOYEES);
    let outcome = validate_row(
        &row(&[("name", "Ada")]),
        &schema,
        &ValidatorTable::standard(),
    );
    assert!(!outcome.is_valid);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors["sin"], Violation::RequiredMissing);
    assert_eq!(outcome.errors["sin"].to_string(), "Required field is missing");
}

#[test]
fn empty_optional_columns_are_skipped() {
    let schema = schema(EMPLOYEES);
    let outcome = validate_row(
        &row(&[("name", "Ada"), ("sin", "046454286"), ("email", ""), ("age", "")]),
        &schema,
        &ValidatorTable::standard(),
    );
    assert!(outcome.is_valid);
}

#[test]
fn errors_follow_schema_order_with_one_per_column() {
    let schema = schema(EMPLOYEES);
    let outcome = validate_row(
        &row(&[
            ("age", "12"),
            ("email", "nobody"),
            ("sin", "123456789"),
            ("name", "Bartholomew Jones"),
        ]),
        &schema,
        &ValidatorTable::standard(),
    );
    let columns: Vec<&str> = outcome.errors.keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["name", "sin", "email", "age"]);
    assert_eq!(outcome.errors["name"], Violation::ExceedsMaxLength(10));
    assert_eq!(outcome.errors["sin"], Violation::SinChecksum);
    assert_eq!(outcome.errors["email"], Violation::InvalidEmail);
    assert_eq!(outcome.errors["age"], Violation::BelowMinimum(18.0));
}

#[test]
fn whitespace_only_value_is_not_empty() {
    let schema = schema(
        r#"
columns:
  code: { type: string, required: true, pattern: "^[A-Z]+$" }
"#,
    );
    let outcome = validate_row(&row(&[("code", " ")]), &schema, &ValidatorTable::standard());
    assert_eq!(outcome.errors["code"], Violation::PatternMismatch);
}

#[test]
fn untyped_and_unknown_types_only_check_requiredness() {
    let schema = schema(
        r#"
columns:
  notes: { required: true }
  zip: { type: postal_code, required: true }
"#,
    );
    let table = ValidatorTable::standard();
    let filled = validate_row(&row(&[("notes", "anything"), ("zip", "???")]), &schema, &table);
    assert!(filled.is_valid);

    let empty = validate_row(&row(&[]), &schema, &table);
    assert_eq!(empty.errors.len(), 2);
    assert!(
        empty
            .errors
            .values()
            .all(|violation| *violation == Violation::RequiredMissing)
    );
}

#[test]
fn extra_row_keys_are_ignored() {
    let schema = schema("columns:\n  email: { type: email }\n");
    let outcome = validate_row(
        &row(&[("email", "a@b.com"), ("unexpected", "value")]),
        &schema,
        &ValidatorTable::standard(),
    );
    assert!(outcome.is_valid);
}

#[test]
fn row_validator_uses_the_given_table() {
    let schema = schema("columns:\n  email: { type: email }\n");
    let strict = ValidatorTable::standard().with_email(|value| {
        (!value.ends_with(".org")).then_some(Violation::InvalidEmail)
    });
    let outcome = validate_row(&row(&[("email", "a@b.com")]), &schema, &strict);
    assert_eq!(outcome.errors["email"], Violation::InvalidEmail);
}
