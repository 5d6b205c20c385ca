//! Report generation for finished validation jobs.
//!
//! - **CSV error report**: one line per violated column of every invalid row
//! - **JSON export**: the full batch result, pretty printed

mod csv_report;
mod error;
mod json;

pub use csv_report::{
    DEFAULT_REPORT_PREFIX, REPORT_HEADER, default_report_file_name, resolve_report_path,
    write_error_report, write_error_report_file,
};
pub use error::{ReportError, Result};
pub use json::{write_json_result, write_json_result_file};
