//! Tests for CSV error reports and JSON exports.

use rowguard_model::{BatchResult, DateFormat, Row, ValidationOutcome, Violation};
use rowguard_report::{resolve_report_path, write_error_report, write_json_result};

fn sample_result() -> BatchResult {
    let valid: Row = [("name", "Ada"), ("start", "2024-01-02")].into_iter().collect();
    let invalid: Row = [("name", "Smith, John"), ("start", "01/02/2024")]
        .into_iter()
        .collect();
    let sparse: Row = [("start", "2024-13-40")].into_iter().collect();

    let mut second = ValidationOutcome::valid();
    second.record("name", Violation::PatternMismatch);
    second.record("start", Violation::DateFormatMismatch(DateFormat::IsoDate));
    let mut third = ValidationOutcome::valid();
    third.record("name", Violation::RequiredMissing);
    third.record("start", Violation::InvalidDate);

    let mut result = BatchResult::new(3);
    result.record(1, ValidationOutcome::valid(), &valid);
    result.record(2, second, &invalid);
    result.record(3, third, &sparse);
    result
}

#[test]
fn error_report_has_one_line_per_violation() {
    let mut buffer = Vec::new();
    write_error_report(&sample_result(), &mut buffer).expect("write report");
    let text = String::from_utf8(buffer).expect("utf8 report");

    insta::assert_snapshot!(text, @r#"
    Row,Field,Error,Value
    2,name,Does not match required pattern,"Smith, John"
    2,start,Date must be in YYYY-MM-DD format,01/02/2024
    3,name,Required field is missing,
    3,start,Invalid date format,2024-13-40
    "#);
}

#[test]
fn error_report_for_clean_batch_is_header_only() {
    let row: Row = [("name", "Ada")].into_iter().collect();
    let mut result = BatchResult::new(1);
    result.record(1, ValidationOutcome::valid(), &row);

    let mut buffer = Vec::new();
    write_error_report(&result, &mut buffer).expect("write report");
    assert_eq!(String::from_utf8(buffer).expect("utf8"), "Row,Field,Error,Value\n");
}

#[test]
fn json_result_round_trips_counters() {
    let mut buffer = Vec::new();
    write_json_result(&sample_result(), &mut buffer).expect("write json");
    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("parse json");

    assert_eq!(value["totalRows"], 3);
    assert_eq!(value["validRows"], 1);
    assert_eq!(value["invalidRows"], 2);
    assert_eq!(value["details"][1]["rowIndex"], 3);
    assert_eq!(value["details"][1]["errors"]["name"], "Required field is missing");
    assert!(value["details"][1]["rowData"].get("name").is_none());
}

#[test]
fn directory_targets_get_dated_file_name() {
    let dir = std::env::temp_dir();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 11, 30).expect("valid date");
    let path = resolve_report_path(&dir, date);
    assert_eq!(path, dir.join("validation-results-2025-11-30.csv"));
}
