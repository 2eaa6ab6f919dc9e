use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use icsr_model::{IssueReport, ValidationIssue};

use crate::commands::{SchemaRow, ValidateResult};

pub fn print_validation(result: &ValidateResult) {
    println!("File: {}", result.file.display());
    println!("{}", verdict_table(&result.report));
    if !result.report.issues.is_empty() {
        println!();
        println!("Issues:");
        println!("{}", issue_table(&result.report.issues));
    }
}

pub fn print_schema(rows: &[SchemaRow]) {
    println!("{}", schema_table(rows));
}

pub fn verdict_table(report: &IssueReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Valid"), header_cell("Issues")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    let verdict = if report.is_valid {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    };
    table.add_row(vec![verdict, count_cell(report.issue_count(), Color::Red)]);
    table
}

pub fn issue_table(issues: &[ValidationIssue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Path"),
        header_cell("Code"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    apply_issue_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.path.to_string()).fg(Color::Blue),
            Cell::new(&issue.code).fg(Color::Red),
            Cell::new(&issue.message),
            match &issue.offending_value {
                Some(value) => Cell::new(value),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

pub fn schema_table(rows: &[SchemaRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Layer"),
        header_cell("Entity"),
        header_cell("Type"),
        header_cell("Scalars"),
        header_cell("Nested"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        let nested = if row.nested.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(row.nested.join("\n"))
        };
        table.add_row(vec![
            Cell::new(row.layer).fg(Color::DarkGrey),
            Cell::new(row.entity).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(row.type_name),
            Cell::new(row.scalars),
            nested,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ColumnConstraint::UpperBoundary(Width::Fixed(24)),
        ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ColumnConstraint::UpperBoundary(Width::Fixed(40)),
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
