//! Terminal tables for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use grd_anonymize::AnonymizeReport;
use grd_query::DatasetStatistics;

/// Dataset statistics as a two-column table.
pub fn statistics_table(stats: &DatasetStatistics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows = [
        ("Patients", stats.total_patients),
        ("Men", stats.men),
        ("Women", stats.women),
        ("Distinct services", stats.unique_services),
        ("Distinct diagnoses", stats.unique_diagnoses),
        ("Distinct years", stats.unique_years),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), count_cell(value)]);
    }
    table
}

/// Anonymization counts as a two-column table.
pub fn anonymize_table(report: &AnonymizeReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Written"), count_cell(report.rows_written)]);
    table.add_row(vec![Cell::new("Rewritten"), count_cell(report.rows_rewritten)]);
    table.add_row(vec![
        Cell::new("Skipped (too short)"),
        if report.rows_skipped > 0 {
            Cell::new(report.rows_skipped).fg(Color::Yellow)
        } else {
            dim_cell(0)
        },
    ]);
    table.add_row(vec![
        Cell::new("Identifiers issued").add_attribute(Attribute::Bold),
        Cell::new(report.identifiers_issued).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
