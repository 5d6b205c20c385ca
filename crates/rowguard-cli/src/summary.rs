use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use rowguard_cli::job::{JobOutcome, JobRequest};

/// Shown in the error table when a column has no value at all.
const EMPTY_VALUE: &str = "(empty)";

pub fn print_summary(request: &JobRequest, outcome: &JobOutcome, limit: usize) {
    let result = &outcome.result;
    println!("Input: {}", request.input.display());
    println!(
        "Template: {} ({} columns)",
        request.schema.label(),
        outcome.schema.len()
    );
    if let Some(path) = &outcome.report_path {
        println!("Error report: {}", path.display());
    }
    if let Some(path) = &outcome.json_path {
        println!("JSON result: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total rows"),
        header_cell("Valid rows"),
        header_cell("Invalid rows"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.total_rows).add_attribute(Attribute::Bold),
        count_cell(result.valid_rows, Color::Green),
        count_cell(result.invalid_rows, Color::Red),
        count_cell(result.error_count(), Color::Red),
    ]);
    println!("{table}");
    print_error_table(outcome, limit);
}

fn print_error_table(outcome: &JobOutcome, limit: usize) {
    let result = &outcome.result;
    if result.details.is_empty() {
        println!();
        println!("No validation errors found");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Error"),
        header_cell("Value"),
    ]);
    apply_error_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    let errors = result.details.iter().flat_map(|detail| {
        detail
            .errors
            .iter()
            .map(move |(field, violation)| (detail, field, violation))
    });
    for (detail, field, violation) in errors.take(limit) {
        let value_cell = match detail.row_data.get(field) {
            Some(value) if !value.is_empty() => Cell::new(value),
            _ => dim_cell(EMPTY_VALUE),
        };
        table.add_row(vec![
            Cell::new(detail.row_index),
            Cell::new(field).fg(Color::Blue),
            Cell::new(violation).fg(Color::Red),
            value_cell,
        ]);
    }
    println!();
    println!("Errors:");
    println!("{table}");

    let total = result.error_count();
    if total > limit {
        println!(
            "Showing {limit} of {total} errors; use --report or --limit to see more."
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_error_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ColumnConstraint::UpperBoundary(Width::Percentage(35)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
