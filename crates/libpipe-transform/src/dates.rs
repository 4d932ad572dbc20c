//! Date normalization.
//!
//! Textual dates in the common circulation-export formats are parsed into
//! [`Value::Date`], the canonical form (rendered `YYYY-MM-DD`). Time-of-day
//! parts are discarded.
//!
//! Slash-separated dates are read month-first (`MM/DD/YYYY`); the day-first
//! reading is only used when the month-first one is impossible.
//!
//! Values that cannot be parsed keep their original value and are reported
//! in [`DateNormalization::unparsed`].

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use libpipe_model::{Dataset, Value};
use serde::Serialize;

use crate::error::Result;

const DATETIME_FORMATS: [&str; 11] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 14] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",  // US: 01/15/2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d.%m.%Y",  // 15.01.2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%m-%d-%Y",  // 01-15-2024
    "%d-%m-%Y",  // 15-01-2024
];

/// Two-digit years, tried only after every four-digit form failed.
const SHORT_YEAR_FORMATS: [&str; 2] = ["%m/%d/%y", "%d/%m/%y"];

/// A value left unchanged because it is not a recognizable date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnparsedDate {
    pub row: usize,
    pub column: String,
    pub value: Value,
}

/// Output of [`standardize_dates`].
#[derive(Debug, Clone, PartialEq)]
pub struct DateNormalization {
    pub dataset: Dataset,
    /// Cells that kept their original value, in row-major order.
    pub unparsed: Vec<UnparsedDate>,
}

impl DateNormalization {
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn is_clean(&self) -> bool {
        self.unparsed.is_empty()
    }
}

/// Rewrites `columns` into canonical dates.
///
/// Absent cells stay absent. Cells that do not parse keep their value and
/// are listed in the result.
///
/// # Errors
///
/// Fails with an unknown-column error if a column is not in the dataset.
pub fn standardize_dates<S: AsRef<str>>(
    dataset: &Dataset,
    columns: &[S],
) -> Result<DateNormalization> {
    let mut positions = dataset.resolve_columns(columns)?;
    // A column named twice is normalized once.
    let mut seen = BTreeSet::new();
    positions.retain(|pos| seen.insert(*pos));
    let mut normalized = dataset.clone();
    let mut unparsed = Vec::new();
    for row in 0..normalized.height() {
        for &pos in &positions {
            let Some(cell) = normalized.cell_mut(row, pos) else {
                continue;
            };
            if cell.is_absent() {
                continue;
            }
            match parse_date_value(cell) {
                Some(date) => *cell = Value::Date(date),
                None => unparsed.push(UnparsedDate {
                    row,
                    column: dataset.columns()[pos].clone(),
                    value: cell.clone(),
                }),
            }
        }
    }
    Ok(DateNormalization {
        dataset: normalized,
        unparsed,
    })
}

/// Parses a cell into a calendar date.
///
/// Dates pass through, text is parsed with [`parse_date`], and integers are
/// read as compact `YYYYMMDD`. Other values never parse.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Text(text) => parse_date(text),
        Value::Integer(v) => parse_compact(&v.to_string()),
        Value::Absent | Value::Float(_) | Value::Boolean(_) => None,
    }
}

/// Parses a textual date or date-time into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_date(trimmed))
        .or_else(|| parse_compact(trimmed))
        .or_else(|| try_parse_short_year(trimmed))
}

fn has_full_year(date: NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDate> {
    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .find(|date| has_full_year(*date))
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|date| has_full_year(*date))
}

fn try_parse_short_year(value: &str) -> Option<NaiveDate> {
    SHORT_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Compact `YYYYMMDD`.
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).filter(|date| has_full_year(*date))
}
