use rowguard_model::{Row, Schema, ValidationOutcome, Violation};
use tracing::trace;

use crate::table::ValidatorTable;

/// Check one row against every column of the schema, in schema order.
///
/// Absent keys read as empty. Empty optional columns are skipped, empty
/// required columns get [`Violation::RequiredMissing`] without a type check,
/// and non-empty values go through the column's validator.
pub fn validate_row(row: &Row, schema: &Schema, table: &ValidatorTable) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::valid();
    for (column, def) in schema.columns() {
        let value = row.value_or_empty(column);
        if value.is_empty() {
            if def.required {
                trace!(column, code = Violation::RequiredMissing.code(), "column violation");
                outcome.record(column, Violation::RequiredMissing);
            }
            continue;
        }
        if let Some(violation) = table.check(value, &def.rule) {
            trace!(column, code = violation.code(), "column violation");
            outcome.record(column, violation);
        }
    }
    outcome
}
