//! Spreadsheet row source: the first worksheet of an Excel or OpenDocument workbook.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rowguard_model::Row;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Read the first worksheet.
///
/// The first row holds the headers; columns with a blank header are dropped.
/// Every other column is present in every row, empty cells reading as `""`.
/// Rows with no content are skipped.
pub fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Row>> {
    let spreadsheet_error = |source| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(IngestError::MalformedRows {
            path: path.to_path_buf(),
            message: "workbook has no worksheets".to_string(),
        });
    };
    let range = range.map_err(spreadsheet_error)?;

    let mut records = range.rows();
    let Some(header_row) = records.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<(usize, String)> = header_row
        .iter()
        .map(cell_text)
        .enumerate()
        .filter(|(_, header)| !header.trim().is_empty())
        .collect();
    debug!(columns = headers.len(), "spreadsheet header");

    let mut rows = Vec::new();
    for record in records {
        if record.iter().all(is_blank) {
            continue;
        }
        let row: Row = headers
            .iter()
            .map(|(index, header)| {
                let value = record.get(*index).map(cell_text).unwrap_or_default();
                (header.as_str(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Text of a cell as it would be handed to a validator.
///
/// Whole numbers drop the fractional part, booleans read `true`/`false`,
/// and date-formatted cells become ISO dates (with a time when one is set).
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(int) => int.to_string(),
        Data::Float(float) => float.to_string(),
        Data::Bool(flag) => flag.to_string(),
        Data::DateTime(datetime) => {
            if datetime.is_duration() {
                datetime.as_f64().to_string()
            } else {
                serial_date_text(datetime.as_f64())
            }
        }
        Data::Error(error) => error.to_string(),
    }
}

/// Render a 1900-system serial date.
fn serial_date_text(serial: f64) -> String {
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;
    let start = NaiveDate::from_ymd_opt(1899, 12, 30)
        .zip(TimeDelta::try_days(days as i64))
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset))
        .map(|date| date.and_time(NaiveTime::MIN));
    let Some(start) = start else {
        return serial.to_string();
    };
    if seconds == 0 {
        return start.format("%Y-%m-%d").to_string();
    }
    TimeDelta::try_seconds(seconds)
        .and_then(|offset| start.checked_add_signed(offset))
        .map_or_else(
            || serial.to_string(),
            |datetime| datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
}
