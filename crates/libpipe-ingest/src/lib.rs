//! Data ingestion for library operations files.
//!
//! Loads CSV, JSON and spreadsheet files into [`Dataset`](libpipe_model::Dataset)
//! values.
//!
//! # Features
//!
//! - **CSV**: header row defines columns, NA tokens become absent, per-column type inference
//! - **JSON**: record lists, optionally wrapped under a configurable key, flattened to columns
//! - **Spreadsheets**: one or many sheets through `calamine`
//! - **Observers**: progress and failures reported through [`LoadObserver`]
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use libpipe_ingest::{CsvOptions, load_csv};
//!
//! let circulation = load_csv(Path::new("data/circulation_data.csv"), &CsvOptions::default())?;
//! println!("{} rows", circulation.height());
//! ```

mod delimited;
mod error;
mod excel;
mod header;
mod json;
mod load;
mod observer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Format Readers ===
pub use delimited::{CsvOptions, DEFAULT_NA_VALUES, load_csv, load_csv_with_observer};
pub use excel::{SheetSelection, load_excel, load_excel_with_observer};
pub use json::{DEFAULT_RECORD_KEY, JsonOptions, load_json, load_json_with_observer};

// === Dispatch ===
pub use load::{FileFormat, LoadOptions, Loaded, load, load_with_observer};

// === Observers ===
pub use observer::{LoadObserver, LoadSummary, SilentObserver, TracingObserver};
