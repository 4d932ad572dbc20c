//! Missing-value resolution.
//!
//! Three mutually exclusive strategies are supported:
//!
//! | Strategy       | Effect on absent cells in the selected columns          |
//! |----------------|---------------------------------------------------------|
//! | `drop`         | the whole record is removed                             |
//! | `fill`         | replaced by one caller-supplied value                   |
//! | `forward_fill` | replaced by the nearest earlier present value, if any   |

use std::fmt;
use std::str::FromStr;

use libpipe_model::{Dataset, Value};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// Strategy names without their options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Drop,
    Fill,
    ForwardFill,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::Drop, Self::Fill, Self::ForwardFill];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Fill => "fill",
            Self::ForwardFill => "forward_fill",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = TransformError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| TransformError::UnknownStrategy {
                name: name.to_string(),
            })
    }
}

/// A fully configured missing-value strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingValueStrategy {
    /// Remove records with an absent value in any selected column.
    Drop,
    /// Replace absent values with the carried value.
    Fill(Value),
    /// Carry the previous present value of the same column downwards.
    /// Leading absent values stay absent.
    ForwardFill,
}

impl MissingValueStrategy {
    /// Builds a strategy from its name and the optional fill value.
    ///
    /// `fill_value` is required for `fill` and ignored otherwise.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnknownStrategy`] for an unrecognized name and
    /// [`TransformError::MissingOption`] for `fill` without a value.
    pub fn from_name(name: &str, fill_value: Option<Value>) -> Result<Self> {
        match name.parse::<StrategyKind>()? {
            StrategyKind::Drop => Ok(Self::Drop),
            StrategyKind::ForwardFill => Ok(Self::ForwardFill),
            StrategyKind::Fill => fill_value.map(Self::Fill).ok_or(TransformError::MissingOption {
                strategy: StrategyKind::Fill.as_str(),
                option: "fill_value",
            }),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Drop => StrategyKind::Drop,
            Self::Fill(_) => StrategyKind::Fill,
            Self::ForwardFill => StrategyKind::ForwardFill,
        }
    }
}

/// Resolves absent values in `columns` (every column when `None`).
///
/// Column names are checked before any record is looked at. An empty dataset
/// comes back unchanged whatever the strategy.
///
/// # Errors
///
/// Fails with an unknown-column error if a selected column is not present.
pub fn handle_missing_values<S: AsRef<str>>(
    dataset: &Dataset,
    strategy: &MissingValueStrategy,
    columns: Option<&[S]>,
) -> Result<Dataset> {
    let positions = dataset.resolve_selection(columns)?;
    if dataset.is_empty() {
        return Ok(dataset.clone());
    }
    let resolved = match strategy {
        MissingValueStrategy::Drop => {
            dataset.filter_rows(|_, record| !record.has_absent_in(&positions))
        }
        MissingValueStrategy::Fill(fill_value) => fill(dataset, &positions, fill_value),
        MissingValueStrategy::ForwardFill => forward_fill(dataset, &positions),
    };
    Ok(resolved)
}

fn fill(dataset: &Dataset, positions: &[usize], fill_value: &Value) -> Dataset {
    let mut filled = dataset.clone();
    for row in 0..filled.height() {
        for &pos in positions {
            if let Some(cell) = filled.cell_mut(row, pos)
                && cell.is_absent()
            {
                *cell = fill_value.clone();
            }
        }
    }
    filled
}

fn forward_fill(dataset: &Dataset, positions: &[usize]) -> Dataset {
    let mut filled = dataset.clone();
    for &pos in positions {
        let mut last: Option<Value> = None;
        for row in 0..filled.height() {
            let Some(cell) = filled.cell_mut(row, pos) else {
                continue;
            };
            if cell.is_absent() {
                if let Some(previous) = &last {
                    *cell = previous.clone();
                }
            } else {
                last = Some(cell.clone());
            }
        }
    }
    filled
}
