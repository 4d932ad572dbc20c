//! Error types for data ingestion.

use std::path::PathBuf;

use libpipe_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a file into a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Path does not resolve to an existing file.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension does not map to a supported format.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === CSV Errors ===
    /// CSV file has no header and no rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// CSV content could not be tokenized.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === JSON Errors ===
    /// Not valid JSON (including an empty file).
    #[error("Invalid JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that does not describe records.
    #[error("JSON in {path} does not contain records: {reason}")]
    JsonShape { path: PathBuf, reason: String },

    // === Spreadsheet Errors ===
    /// The spreadsheet engine could not open or read the workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Requested sheet does not exist.
    #[error("worksheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    // === Dataset Errors ===
    /// Loaded content could not form a dataset.
    #[error("invalid table in {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// Path of the file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path }
            | Self::FileRead { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::EmptyCsv { path }
            | Self::CsvParse { path, .. }
            | Self::JsonParse { path, .. }
            | Self::JsonShape { path, .. }
            | Self::Workbook { path, .. }
            | Self::SheetNotFound { path, .. }
            | Self::Model { path, .. } => path,
        }
    }

    /// True for errors about content rather than file access.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(
            self,
            Self::FileNotFound { .. } | Self::FileRead { .. } | Self::UnsupportedFormat { .. }
        )
    }

    pub(crate) fn model(path: &std::path::Path, source: ModelError) -> Self {
        Self::Model {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
