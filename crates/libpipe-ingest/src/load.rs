//! Format dispatch by file extension.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use libpipe_model::Dataset;

use crate::delimited::{CsvOptions, read_csv};
use crate::error::{IngestError, Result};
use crate::excel::{SheetSelection, read_excel};
use crate::json::{JsonOptions, read_json};
use crate::observer::{LoadObserver, TracingObserver, observed};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Excel,
}

impl FileFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "excel",
        })
    }
}

/// Result of a load: one table, or one table per sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Single(Dataset),
    /// Sheets keyed, and therefore ordered, by sheet name.
    Sheets(BTreeMap<String, Dataset>),
}

impl Loaded {
    /// Every table with a display name (the sheet name, or `None`).
    pub fn tables(&self) -> Vec<(Option<&str>, &Dataset)> {
        match self {
            Self::Single(dataset) => vec![(None, dataset)],
            Self::Sheets(sheets) => sheets
                .iter()
                .map(|(name, dataset)| (Some(name.as_str()), dataset))
                .collect(),
        }
    }

    pub fn into_single(self) -> Option<Dataset> {
        match self {
            Self::Single(dataset) => Some(dataset),
            Self::Sheets(_) => None,
        }
    }
}

/// Options for [`load`]. Only the options of the detected format are used.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Overrides extension-based detection.
    pub format: Option<FileFormat>,
    pub csv: CsvOptions,
    pub json: JsonOptions,
    pub sheets: SheetSelection,
}

/// Loads any supported file, choosing the reader from the extension.
///
/// # Errors
///
/// [`IngestError::UnsupportedFormat`] when the format cannot be determined,
/// plus every error of the selected reader.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Loaded> {
    load_with_observer(path, options, &TracingObserver)
}

pub fn load_with_observer(
    path: &Path,
    options: &LoadOptions,
    observer: &dyn LoadObserver,
) -> Result<Loaded> {
    let Some(format) = options.format.or_else(|| FileFormat::from_path(path)) else {
        let error = if path.is_file() {
            IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            }
        } else {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        };
        observer.on_failed(path, &error);
        return Err(error);
    };
    observed(path, format, observer, || match format {
        FileFormat::Csv => read_csv(path, &options.csv).map(Loaded::Single),
        FileFormat::Json => read_json(path, &options.json).map(Loaded::Single),
        FileFormat::Excel => read_excel(path, &options.sheets),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("data/circulation_data.CSV")),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("events_data.json")),
            Some(FileFormat::Json)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("catalogue.xlsx")),
            Some(FileFormat::Excel)
        );
        assert_eq!(FileFormat::from_path(Path::new("notes.parquet")), None);
        assert_eq!(FileFormat::from_path(Path::new("README")), None);
    }
}
