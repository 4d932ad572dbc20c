//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use libpipe_ingest::DEFAULT_RECORD_KEY;
use libpipe_cli::plan::PlanOverrides;

#[derive(Parser)]
#[command(
    name = "library-pipeline",
    version,
    about = "Clean and validate library operations data",
    long_about = "Clean and validate library operations data.\n\n\
                  Loads circulation, catalogue and event files (CSV, JSON, spreadsheets),\n\
                  removes duplicate records, resolves missing values, normalizes dates\n\
                  and checks ISBN-13 identifier columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (patron and item data) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a file, run the cleaning stages and print a summary.
    Clean(CleanArgs),

    /// Load a file and print its shape and first rows.
    Inspect(InspectArgs),

    /// Check that an identifier column holds ISBN-13 shaped values.
    CheckIsbn(CheckIsbnArgs),
}

/// Input file and loader options shared by every command.
#[derive(Args)]
pub struct LoadArgs {
    /// Input file (.csv, .tsv, .json, .xlsx, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: detected from the extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// CSV field delimiter (default: tab for .tsv, comma otherwise).
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// CSV columns to keep as text (e.g. barcodes with leading zeros).
    #[arg(long = "text-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub text_columns: Vec<String>,

    /// JSON key holding the record list.
    #[arg(long = "json-key", value_name = "KEY", default_value = DEFAULT_RECORD_KEY)]
    pub json_key: String,

    /// Worksheet to read; repeat for several (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// Read every worksheet.
    #[arg(long = "all-sheets", conflicts_with = "sheets")]
    pub all_sheets: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// JSON cleaning plan. Flags below override its fields.
    #[arg(long = "plan", value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Remove duplicate records, comparing every column.
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Remove duplicate records, comparing only these columns.
    #[arg(long = "dedupe-on", value_name = "COLUMNS", value_delimiter = ',')]
    pub dedupe_on: Option<Vec<String>>,

    /// Missing-value strategy: drop, fill or forward_fill.
    #[arg(long = "missing", value_name = "STRATEGY")]
    pub missing: Option<String>,

    /// Replacement for absent values (required with --missing fill).
    #[arg(long = "fill-value", value_name = "VALUE")]
    pub fill_value: Option<String>,

    /// Columns the missing-value strategy applies to (default: all).
    #[arg(long = "missing-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub missing_columns: Option<Vec<String>>,

    /// Columns to normalize to YYYY-MM-DD dates.
    #[arg(long = "dates", value_name = "COLUMNS", value_delimiter = ',')]
    pub dates: Option<Vec<String>>,

    /// Summary output format.
    #[arg(long = "summary-format", value_enum, default_value = "table")]
    pub summary_format: SummaryFormatArg,

    /// Number of cleaned rows to preview.
    #[arg(long = "preview", value_name = "N", default_value_t = 5)]
    pub preview: usize,
}

impl CleanArgs {
    pub fn overrides(&self) -> PlanOverrides {
        PlanOverrides {
            dedupe: self.dedupe,
            dedupe_on: self.dedupe_on.clone(),
            missing: self.missing.clone(),
            fill_value: self.fill_value.clone(),
            missing_columns: self.missing_columns.clone(),
            dates: self.dates.clone(),
        }
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Number of rows to preview.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,
}

#[derive(Parser)]
pub struct CheckIsbnArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Column holding the identifiers.
    #[arg(long = "column", value_name = "COLUMN", default_value = "isbn")]
    pub column: String,

    /// Maximum number of invalid values to show per table.
    #[arg(long = "samples", value_name = "N", default_value_t = 5)]
    pub samples: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Excel,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
