//! Delimited text (CSV) reading.

use std::path::Path;

use csv::ReaderBuilder;
use libpipe_model::value::{parse_bool, parse_f64, parse_i64};
use libpipe_model::{Dataset, Value};

use crate::error::{IngestError, Result};
use crate::header::unique_headers;
use crate::load::FileFormat;
use crate::observer::{LoadObserver, TracingObserver, observed};

/// Cell contents read as absent by default.
pub const DEFAULT_NA_VALUES: [&str; 11] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Options for CSV loading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter byte. When `None`, `.tsv` files use a tab and
    /// everything else a comma.
    pub delimiter: Option<u8>,
    /// Trimmed cell contents that mean "no value".
    pub na_values: Vec<String>,
    /// Columns kept as text instead of being type-inferred (e.g. barcodes
    /// with leading zeros).
    pub text_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            na_values: DEFAULT_NA_VALUES.iter().map(ToString::to_string).collect(),
            text_columns: Vec::new(),
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Delimiter used for `path`.
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        self.delimiter.unwrap_or_else(|| {
            let is_tsv = path
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
            if is_tsv { b'\t' } else { b',' }
        })
    }

    #[must_use]
    pub fn with_text_columns(mut self, columns: Vec<String>) -> Self {
        self.text_columns = columns;
        self
    }

    fn is_na(&self, cell: &str) -> bool {
        self.na_values.iter().any(|token| token == cell)
    }
}

/// Loads a CSV file whose first row is the header.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path is not an existing file
/// - [`IngestError::EmptyCsv`] if there is no header row
/// - [`IngestError::CsvParse`] if a record cannot be tokenized or has more
///   fields than the header
pub fn load_csv(path: &Path, options: &CsvOptions) -> Result<Dataset> {
    load_csv_with_observer(path, options, &TracingObserver)
}

pub fn load_csv_with_observer(
    path: &Path,
    options: &CsvOptions,
    observer: &dyn LoadObserver,
) -> Result<Dataset> {
    observed(path, FileFormat::Csv, observer, || read_csv(path, options))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Narrowest kind that every present cell fits.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let (mut integer, mut float, mut boolean) = (true, true, true);
    for cell in cells {
        integer &= parse_i64(cell).is_some();
        float &= parse_f64(cell).is_some();
        boolean &= parse_bool(cell).is_some();
    }
    if integer {
        ColumnKind::Integer
    } else if float {
        ColumnKind::Float
    } else if boolean {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

fn typed_value(cell: Option<String>, kind: ColumnKind) -> Value {
    let Some(cell) = cell else {
        return Value::Absent;
    };
    let typed = match kind {
        ColumnKind::Integer => parse_i64(&cell).map(Value::Integer),
        ColumnKind::Float => parse_f64(&cell).map(Value::Float),
        ColumnKind::Boolean => parse_bool(&cell).map(Value::Boolean),
        ColumnKind::Text => None,
    };
    typed.unwrap_or(Value::Text(cell))
}

fn csv_error(path: &Path, error: csv::Error) -> IngestError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

pub(crate) fn read_csv(path: &Path, options: &CsvOptions) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter_for(path))
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;
    let header_record = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    if header_record.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let columns = unique_headers(header_record.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.len() > width {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(IngestError::CsvParse {
                path: path.to_path_buf(),
                message: format!(
                    "expected {width} fields in line {line}, saw {}",
                    record.len()
                ),
            });
        }
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|cell| {
                let cell = cell.trim().trim_matches('\u{feff}');
                (!options.is_na(cell)).then(|| cell.to_string())
            })
            .collect();
        row.resize(width, None);
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = columns
        .iter()
        .enumerate()
        .map(|(pos, name)| {
            if options.text_columns.iter().any(|text| text == name) {
                ColumnKind::Text
            } else {
                infer_kind(raw_rows.iter().filter_map(|row| row[pos].as_deref()))
            }
        })
        .collect();

    let mut dataset = Dataset::new(columns).map_err(|e| IngestError::model(path, e))?;
    for row in raw_rows {
        let values = row
            .into_iter()
            .zip(&kinds)
            .map(|(cell, kind)| typed_value(cell, *kind))
            .collect();
        dataset
            .push_row(values)
            .map_err(|e| IngestError::model(path, e))?;
    }
    Ok(dataset)
}
