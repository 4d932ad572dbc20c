//! Spreadsheet loading through `calamine`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, DataType, Range, Reader, Sheets, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use libpipe_model::{Dataset, Value};

use crate::error::{IngestError, Result};
use crate::header::unique_headers;
use crate::load::{FileFormat, Loaded};
use crate::observer::{LoadObserver, TracingObserver, observed};

type Workbook = Sheets<BufReader<File>>;

/// Which worksheets to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelection {
    /// Zero-based sheet position.
    Index(usize),
    Name(String),
    /// Several sheets by name. Multi-sheet results are keyed and ordered by
    /// sheet name.
    Names(Vec<String>),
    /// Every sheet in the workbook.
    All,
}

impl Default for SheetSelection {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// Loads worksheets from a workbook. The first row of each sheet is the
/// header; fully empty rows are skipped.
///
/// [`SheetSelection::Index`] and [`SheetSelection::Name`] produce
/// [`Loaded::Single`]; the others produce [`Loaded::Sheets`].
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path is not an existing file
/// - [`IngestError::Workbook`] if the workbook or a sheet cannot be read
/// - [`IngestError::SheetNotFound`] for an unknown sheet name or position
pub fn load_excel(path: &Path, selection: &SheetSelection) -> Result<Loaded> {
    load_excel_with_observer(path, selection, &TracingObserver)
}

pub fn load_excel_with_observer(
    path: &Path,
    selection: &SheetSelection,
    observer: &dyn LoadObserver,
) -> Result<Loaded> {
    observed(path, FileFormat::Excel, observer, || {
        read_excel(path, selection)
    })
}

pub(crate) fn read_excel(path: &Path, selection: &SheetSelection) -> Result<Loaded> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    let names = workbook.sheet_names();
    match selection {
        SheetSelection::Index(idx) => {
            let Some(name) = names.get(*idx) else {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: format!("#{idx}"),
                });
            };
            read_sheet(&mut workbook, path, name).map(Loaded::Single)
        }
        SheetSelection::Name(name) => {
            require_sheet(path, &names, name)?;
            read_sheet(&mut workbook, path, name).map(Loaded::Single)
        }
        SheetSelection::Names(wanted) => {
            for name in wanted {
                require_sheet(path, &names, name)?;
            }
            read_sheets(&mut workbook, path, wanted)
        }
        SheetSelection::All => read_sheets(&mut workbook, path, &names),
    }
}

fn require_sheet(path: &Path, names: &[String], wanted: &str) -> Result<()> {
    if names.iter().any(|name| name == wanted) {
        Ok(())
    } else {
        Err(IngestError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: wanted.to_string(),
        })
    }
}

fn read_sheets(workbook: &mut Workbook, path: &Path, names: &[String]) -> Result<Loaded> {
    let mut sheets = BTreeMap::new();
    for name in names {
        let dataset = read_sheet(workbook, path, name)?;
        sheets.insert(name.clone(), dataset);
    }
    Ok(Loaded::Sheets(sheets))
}

fn read_sheet(workbook: &mut Workbook, path: &Path, name: &str) -> Result<Dataset> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| workbook_error(path, &e))?;
    range_to_dataset(path, &range)
}

fn range_to_dataset(path: &Path, range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Dataset::new(Vec::<String>::new()).map_err(|e| IngestError::model(path, e));
    };
    let columns = unique_headers(header.iter().map(ToString::to_string));
    let width = columns.len();
    let mut body: Vec<Vec<Value>> = rows
        .map(|row| {
            let mut values: Vec<Value> = row.iter().map(cell_value).collect();
            values.resize(width, Value::Absent);
            values
        })
        .filter(|values| !values.iter().all(Value::is_absent))
        .collect();
    downcast_integral_columns(&mut body, width);
    Dataset::from_rows(columns, body).map_err(|e| IngestError::model(path, e))
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(v) => Value::Integer(*v),
        Data::Float(v) => Value::Float(*v),
        Data::String(text) if text.trim().is_empty() => Value::Absent,
        Data::String(text) => Value::Text(text.clone()),
        Data::Bool(flag) => Value::Boolean(*flag),
        Data::DateTime(_) => stamp_value(cell.as_datetime(), cell),
        Data::DateTimeIso(text) => match text.parse::<NaiveDate>() {
            Ok(date) => Value::Date(date),
            Err(_) => stamp_value(text.parse::<NaiveDateTime>().ok(), cell),
        },
        Data::DurationIso(text) => Value::Text(text.clone()),
        Data::Error(_) | Data::Empty => Value::Absent,
    }
}

/// Midnight timestamps are plain dates; anything else keeps its time as text.
fn stamp_value(stamp: Option<NaiveDateTime>, cell: &Data) -> Value {
    match stamp {
        Some(stamp) if stamp.time() == NaiveTime::MIN => Value::Date(stamp.date()),
        Some(stamp) => Value::Text(stamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => Value::Text(cell.to_string()),
    }
}

/// Spreadsheets store every number as a float; columns holding only whole
/// numbers become integer columns.
fn downcast_integral_columns(rows: &mut [Vec<Value>], width: usize) {
    for pos in 0..width {
        let integral = rows.iter().all(|row| match &row[pos] {
            Value::Float(v) => is_integral(*v),
            Value::Integer(_) | Value::Absent => true,
            _ => false,
        });
        if !integral {
            continue;
        }
        for row in rows.iter_mut() {
            if let Value::Float(v) = row[pos] {
                #[allow(clippy::cast_possible_truncation)]
                let whole = v as i64;
                row[pos] = Value::Integer(whole);
            }
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64
}

fn workbook_error(path: &Path, error: &impl std::fmt::Display) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
