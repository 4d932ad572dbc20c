//! Record cleaning stages for library operations datasets.
//!
//! - **dedupe**: keep the first record per key tuple
//! - **missing**: resolve absent values with a [`MissingValueStrategy`]
//! - **dates**: rewrite date columns into canonical [`Value::Date`](libpipe_model::Value::Date)
//! - **plan**: compose the stages in pipeline order
//!
//! Every stage borrows its input and returns a new dataset. Nothing in this
//! crate logs; callers report on the returned values.

pub mod dates;
pub mod dedupe;
pub mod error;
pub mod missing;
pub mod plan;

pub use dates::{DateNormalization, UnparsedDate, parse_date, parse_date_value, standardize_dates};
pub use dedupe::remove_duplicates;
pub use error::{Result, TransformError};
pub use missing::{MissingValueStrategy, StrategyKind, handle_missing_values};
pub use plan::{
    CleaningOutcome, CleaningPlan, CleaningReport, DedupeStep, MissingStep, Stage, StageReport,
};
