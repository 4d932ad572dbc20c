use std::path::PathBuf;

use libpipe_transform::CleaningOutcome;
use libpipe_validate::IsbnReport;

/// One cleaned table. Sheets fail independently.
#[derive(Debug)]
pub struct CleanedTable {
    /// Worksheet name; `None` for single-table files.
    pub sheet: Option<String>,
    pub outcome: Result<CleaningOutcome, String>,
}

#[derive(Debug)]
pub struct CleanResult {
    pub file: PathBuf,
    pub tables: Vec<CleanedTable>,
}

impl CleanResult {
    pub fn has_errors(&self) -> bool {
        self.tables.iter().any(|table| table.outcome.is_err())
    }
}

#[derive(Debug)]
pub struct IsbnTable {
    pub sheet: Option<String>,
    pub outcome: Result<IsbnReport, String>,
}

#[derive(Debug)]
pub struct IsbnResult {
    pub file: PathBuf,
    pub column: String,
    pub tables: Vec<IsbnTable>,
}

impl IsbnResult {
    /// True when a table failed or holds invalid identifiers.
    pub fn has_failures(&self) -> bool {
        self.tables.iter().any(|table| match &table.outcome {
            Ok(report) => !report.is_clean(),
            Err(_) => true,
        })
    }
}
