//! Row sources: decode a tabular file into [`Row`]s.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use rowguard_model::Row;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::spreadsheet::read_spreadsheet_rows;

/// File formats a row source can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    /// Excel (`xlsx`, `xlsm`, `xlsb`, `xls`) or OpenDocument (`ods`) workbook.
    Spreadsheet,
}

impl InputFormat {
    /// Format for `path` by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedInput {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Read every row of a CSV, JSON or spreadsheet file.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let format = InputFormat::from_path(path)?;
    let rows = match format {
        InputFormat::Csv => read_csv_rows(open(path)?, path)?,
        InputFormat::Json => read_json_rows(open(path)?, path)?,
        InputFormat::Spreadsheet => read_spreadsheet_rows(path)?,
    };
    info!(path = %path.display(), ?format, rows = rows.len(), "read input rows");
    Ok(rows)
}

/// Decode CSV with a header record.
///
/// `path` is only used for error context.
pub fn read_csv_rows<R: Read>(reader: R, path: &Path) -> Result<Vec<Row>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();
    debug!(columns = headers.len(), "csv header");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        // Zip stops at the shorter side: short records leave keys absent, extra cells drop.
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.as_str(), cell))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Decode a JSON array of flat objects.
pub fn read_json_rows<R: Read>(reader: R, path: &Path) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_reader(reader).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(malformed(path, "expected a top-level array of objects"));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(Row::from_json_object(object)),
            _ => Err(malformed(path, format!("item {} is not an object", index + 1))),
        })
        .collect()
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| IngestError::io(path, e))
}

fn malformed(path: &Path, message: impl Into<String>) -> IngestError {
    IngestError::MalformedRows {
        path: path.to_path_buf(),
        message: message.into(),
    }
}
