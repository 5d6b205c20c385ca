use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::Writer;
use rowguard_model::BatchResult;
use tracing::info;

use crate::error::{ReportError, Result};

pub const REPORT_HEADER: [&str; 4] = ["Row", "Field", "Error", "Value"];

pub const DEFAULT_REPORT_PREFIX: &str = "validation-results";

/// Write the CSV error report for `result`.
///
/// Lines follow row order, then the order violations were recorded in,
/// which is schema column order.
pub fn write_error_report<W: Write>(result: &BatchResult, writer: W) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(REPORT_HEADER)?;
    for detail in &result.details {
        let row = detail.row_index.to_string();
        for (field, violation) in &detail.errors {
            let message = violation.to_string();
            let value = detail.row_data.value_or_empty(field);
            csv.write_record([row.as_str(), field.as_str(), message.as_str(), value])?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Write the CSV error report to a file, replacing any existing file.
pub fn write_error_report_file(result: &BatchResult, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_error_report(result, BufWriter::new(file))?;
    info!(path = %path.display(), lines = result.error_count(), "wrote error report");
    Ok(())
}

/// `validation-results-YYYY-MM-DD.csv`
pub fn default_report_file_name(date: NaiveDate) -> String {
    format!("{DEFAULT_REPORT_PREFIX}-{}.csv", date.format("%Y-%m-%d"))
}

/// A directory target receives the dated default file name.
pub fn resolve_report_path(target: &Path, date: NaiveDate) -> PathBuf {
    if target.is_dir() {
        target.join(default_report_file_name(date))
    } else {
        target.to_path_buf()
    }
}
