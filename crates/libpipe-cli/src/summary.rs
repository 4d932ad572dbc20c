use anyhow::Result;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use libpipe_ingest::Loaded;
use libpipe_model::{Dataset, Value};
use libpipe_transform::{CleaningReport, Stage};
use libpipe_validate::IsbnReport;

use crate::types::{CleanResult, IsbnResult};

pub fn print_clean_summary(result: &CleanResult, preview: usize) {
    println!("File: {}", result.file.display());
    for table in &result.tables {
        let label = table_label(table.sheet.as_deref());
        match &table.outcome {
            Ok(outcome) => {
                println!();
                println!("{label}");
                println!("{}", stage_table(&outcome.report));
                print_unparsed_dates(&outcome.report);
                if preview > 0 {
                    println!("{}", preview_table(&outcome.dataset, preview));
                }
            }
            Err(error) => {
                eprintln!();
                eprintln!("{label}: error: {error}");
            }
        }
    }
}

#[derive(Serialize)]
struct JsonTableSummary<'a> {
    sheet: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonCleanSummary<'a> {
    file: String,
    tables: Vec<JsonTableSummary<'a>>,
}

pub fn print_clean_json(result: &CleanResult) -> Result<()> {
    let summary = JsonCleanSummary {
        file: result.file.display().to_string(),
        tables: result
            .tables
            .iter()
            .map(|table| {
                let (report, error) = match &table.outcome {
                    Ok(outcome) => (Some(&outcome.report), None),
                    Err(error) => (None, Some(error.as_str())),
                };
                JsonTableSummary {
                    sheet: table.sheet.as_deref(),
                    report,
                    error,
                }
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn print_inspect(loaded: &Loaded, preview: usize) {
    for (sheet, dataset) in loaded.tables() {
        println!("{}", table_label(sheet));
        println!("Rows: {}  Columns: {}", dataset.height(), dataset.width());

        let mut table = Table::new();
        table.set_header(vec![header_cell("Column"), header_cell("Absent")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (column, absent) in dataset.absent_counts() {
            table.add_row(vec![Cell::new(column), count_cell(absent, Color::Yellow)]);
        }
        println!("{table}");
        if preview > 0 {
            println!("{}", preview_table(dataset, preview));
        }
        println!();
    }
}

pub fn print_isbn_summary(result: &IsbnResult, samples: usize) {
    println!("File: {}", result.file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Checked"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Absent"),
        header_cell("Examples"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut errors = Vec::new();
    for entry in &result.tables {
        let label = table_label(entry.sheet.as_deref());
        match &entry.outcome {
            Ok(report) => {
                table.add_row(isbn_row(label, report, samples));
            }
            Err(error) => errors.push(format!("{label}: {error}")),
        }
    }
    println!("Column: {}", result.column);
    println!("{table}");
    if !errors.is_empty() {
        eprintln!("Errors:");
        for error in &errors {
            eprintln!("- {error}");
        }
    }
}

fn isbn_row(label: String, report: &IsbnReport, samples: usize) -> Vec<Cell> {
    let examples = report.samples(samples);
    vec![
        Cell::new(label),
        Cell::new(report.checked),
        Cell::new(report.valid()).fg(Color::Green),
        count_cell(report.invalid.len(), Color::Red),
        count_cell(report.absent, Color::Yellow),
        if examples.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(examples.join(", "))
        },
    ]
}

fn stage_table(report: &CleaningReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Removed"),
        header_cell("Absent cells"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stage in &report.stages {
        table.add_row(vec![
            Cell::new(stage_name(stage.stage))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows_in),
            Cell::new(stage.rows_out),
            count_cell(stage.rows_in - stage.rows_out, Color::Yellow),
            dim_cell(stage.absent_cells),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.input_rows).add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
        count_cell(report.input_rows - report.output_rows, Color::Yellow)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn print_unparsed_dates(report: &CleaningReport) {
    if report.unparsed_dates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for entry in &report.unparsed_dates {
        table.add_row(vec![
            Cell::new(entry.row),
            Cell::new(&entry.column),
            Cell::new(entry.value.to_string()).fg(Color::Yellow),
        ]);
    }
    println!("Unparsed dates (left unchanged):");
    println!("{table}");
}

fn preview_table(dataset: &Dataset, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        dataset
            .columns()
            .iter()
            .map(|column| header_cell(column))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for record in dataset.head(rows).records() {
        table.add_row(record.values().iter().map(value_cell).collect::<Vec<_>>());
    }
    table
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Absent => dim_cell("-"),
        Value::Integer(_) | Value::Float(_) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        _ => Cell::new(value),
    }
}

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Dedupe => "Duplicates",
        Stage::Missing => "Missing values",
        Stage::Dates => "Dates",
    }
}

fn table_label(sheet: Option<&str>) -> String {
    match sheet {
        Some(name) => format!("Sheet: {name}"),
        None => "Table".to_string(),
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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
