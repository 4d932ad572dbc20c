//! Tabular dataset model for library operations data.
//!
//! A [`Dataset`] is an ordered sequence of records sharing one column set.
//! Cells hold a [`Value`], where [`Value::Absent`] marks a cell with no data.
//!
//! Datasets are built once and then treated as immutable: cleaning stages
//! borrow a dataset and return a new one.

pub mod dataset;
pub mod error;
pub mod value;

pub use dataset::{Dataset, Record};
pub use error::{ModelError, Result};
pub use value::Value;
