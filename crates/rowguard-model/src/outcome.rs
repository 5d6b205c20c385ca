//! Per-row and per-batch validation results.

use indexmap::IndexMap;
use serde::Serialize;

use crate::row::Row;
use crate::violation::Violation;

/// Result of checking one row against a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// At most one violation per column, in schema column order.
    pub errors: IndexMap<String, Violation>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: IndexMap::new(),
        }
    }

    /// Record a violation; the first one recorded for a column wins.
    pub fn record(&mut self, column: &str, violation: Violation) {
        self.errors.entry(column.to_string()).or_insert(violation);
        self.is_valid = false;
    }
}

/// One invalid row in a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDetail {
    /// 1-based position in the full dataset.
    pub row_index: usize,
    pub errors: IndexMap<String, Violation>,
    pub row_data: Row,
}

/// Summary counters plus details for every invalid row of one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    /// Invalid rows only, ascending by `row_index`.
    pub details: Vec<RowDetail>,
}

impl BatchResult {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    /// Fold one row's outcome into the counters.
    pub fn record(&mut self, row_index: usize, outcome: ValidationOutcome, row: &Row) {
        if outcome.is_valid {
            self.valid_rows += 1;
        } else {
            self.invalid_rows += 1;
            self.details.push(RowDetail {
                row_index,
                errors: outcome.errors,
                row_data: row.clone(),
            });
        }
    }

    /// Append a result covering the rows immediately after this one's.
    pub fn merge(&mut self, other: BatchResult) {
        self.valid_rows += other.valid_rows;
        self.invalid_rows += other.invalid_rows;
        self.details.extend(other.details);
    }

    pub fn has_invalid_rows(&self) -> bool {
        self.invalid_rows > 0
    }

    /// Number of column violations across all rows.
    pub fn error_count(&self) -> usize {
        self.details.iter().map(|detail| detail.errors.len()).sum()
    }

    /// Whether the counters agree with each other and with the details.
    pub fn is_consistent(&self) -> bool {
        self.valid_rows + self.invalid_rows == self.total_rows
            && self.details.len() == self.invalid_rows
            && self
                .details
                .windows(2)
                .all(|pair| pair[0].row_index < pair[1].row_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_violation_per_column_wins() {
        let mut outcome = ValidationOutcome::valid();
        outcome.record("name", Violation::ExceedsMaxLength(5));
        outcome.record("name", Violation::PatternMismatch);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors["name"], Violation::ExceedsMaxLength(5));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let row: Row = [("sin", "123")].into_iter().collect();
        let mut outcome = ValidationOutcome::valid();
        outcome.record("sin", Violation::SinLength);
        let mut result = BatchResult::new(2);
        result.record(1, ValidationOutcome::valid(), &row);
        result.record(2, outcome, &row);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalRows"], 2);
        assert_eq!(json["validRows"], 1);
        assert_eq!(json["invalidRows"], 1);
        assert_eq!(json["details"][0]["rowIndex"], 2);
        assert_eq!(json["details"][0]["errors"]["sin"], "SIN must be 9 digits");
        assert_eq!(json["details"][0]["rowData"]["sin"], "123");
        assert!(result.is_consistent());
        assert_eq!(result.error_count(), 1);
    }
}
