//! Column-level identifier checks.

use libpipe_model::{Dataset, Value};
use serde::Serialize;

use crate::error::Result;
use crate::isbn::validate_isbn;

/// A value that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidIsbn {
    pub row: usize,
    pub value: Value,
}

/// Outcome of checking one identifier column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsbnReport {
    pub column: String,
    /// Present values examined.
    pub checked: usize,
    pub absent: usize,
    pub invalid: Vec<InvalidIsbn>,
}

impl IsbnReport {
    pub fn valid(&self) -> usize {
        self.checked - self.invalid.len()
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Up to `max` distinct invalid values as text, in row order.
    pub fn samples(&self, max: usize) -> Vec<String> {
        let mut samples: Vec<String> = Vec::new();
        for entry in &self.invalid {
            if samples.len() >= max {
                break;
            }
            let text = entry.value.to_string();
            if !samples.contains(&text) {
                samples.push(text);
            }
        }
        samples
    }
}

/// Checks every value of `column` with [`validate_isbn`].
///
/// Absent cells are counted separately and never reported as invalid.
///
/// # Errors
///
/// Fails with an unknown column error if `column` is not in the dataset.
pub fn check_isbn_column(dataset: &Dataset, column: &str) -> Result<IsbnReport> {
    let values = dataset.column_values(column)?;
    let mut report = IsbnReport {
        column: column.to_string(),
        checked: 0,
        absent: 0,
        invalid: Vec::new(),
    };
    for (row, value) in values.into_iter().enumerate() {
        if value.is_absent() {
            report.absent += 1;
            continue;
        }
        report.checked += 1;
        if !validate_isbn(value) {
            report.invalid.push(InvalidIsbn {
                row,
                value: value.clone(),
            });
        }
    }
    Ok(report)
}
