//! Load progress reporting.
//!
//! Readers never log directly; they report to a [`LoadObserver`]. The
//! convenience functions use [`TracingObserver`].

use std::path::Path;

use libpipe_model::Dataset;

use crate::error::IngestError;
use crate::load::{FileFormat, Loaded};

/// Shape of a successfully loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub sheets: usize,
    pub rows: usize,
    pub columns: usize,
}

impl From<&Dataset> for LoadSummary {
    fn from(dataset: &Dataset) -> Self {
        Self {
            sheets: 1,
            rows: dataset.height(),
            columns: dataset.width(),
        }
    }
}

impl From<&Loaded> for LoadSummary {
    fn from(loaded: &Loaded) -> Self {
        match loaded {
            Loaded::Single(dataset) => Self::from(dataset),
            Loaded::Sheets(sheets) => Self {
                sheets: sheets.len(),
                rows: sheets.values().map(Dataset::height).sum(),
                columns: sheets.values().map(Dataset::width).max().unwrap_or(0),
            },
        }
    }
}

/// Receives loader progress events.
pub trait LoadObserver {
    fn on_start(&self, _path: &Path, _format: FileFormat) {}
    fn on_loaded(&self, _path: &Path, _summary: &LoadSummary) {}
    fn on_failed(&self, _path: &Path, _error: &IngestError) {}
}

/// Emits `tracing` events for every load.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_start(&self, path: &Path, format: FileFormat) {
        tracing::info!(path = %path.display(), %format, "loading file");
    }

    fn on_loaded(&self, path: &Path, summary: &LoadSummary) {
        if summary.sheets > 1 {
            tracing::info!(
                path = %path.display(),
                sheets = summary.sheets,
                rows = summary.rows,
                "loaded workbook"
            );
        } else {
            tracing::info!(
                path = %path.display(),
                rows = summary.rows,
                columns = summary.columns,
                "loaded file"
            );
        }
    }

    fn on_failed(&self, path: &Path, error: &IngestError) {
        tracing::error!(path = %path.display(), error = %error, "load failed");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl LoadObserver for SilentObserver {}

/// Runs `read` between observer callbacks.
pub(crate) fn observed<T, F>(
    path: &Path,
    format: FileFormat,
    observer: &dyn LoadObserver,
    read: F,
) -> crate::Result<T>
where
    F: FnOnce() -> crate::Result<T>,
    for<'a> LoadSummary: From<&'a T>,
{
    if !path.is_file() {
        let error = IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
        observer.on_failed(path, &error);
        return Err(error);
    }
    observer.on_start(path, format);
    match read() {
        Ok(value) => {
            observer.on_loaded(path, &LoadSummary::from(&value));
            Ok(value)
        }
        Err(error) => {
            observer.on_failed(path, &error);
            Err(error)
        }
    }
}
