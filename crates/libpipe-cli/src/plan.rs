//! Cleaning plans from JSON files and command-line flags.
//!
//! A plan file looks like:
//!
//! ```json
//! {
//!   "dedupe": { "keys": ["transaction_id"] },
//!   "missing": { "strategy": "fill", "fill_value": 0, "columns": ["fine"] },
//!   "dates": ["checkout_date", "return_date"]
//! }
//! ```
//!
//! Every section is optional. Flags given on the command line replace the
//! matching plan field.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use libpipe_model::Value;
use libpipe_transform::{CleaningPlan, MissingValueStrategy};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    #[serde(default)]
    pub dedupe: Option<DedupeSection>,
    #[serde(default)]
    pub missing: Option<MissingSection>,
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DedupeSection {
    /// Key columns; every column when omitted.
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissingSection {
    pub strategy: String,
    #[serde(default)]
    pub fill_value: Option<serde_json::Value>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl PlanFile {
    /// Reads a plan from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read plan file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse plan file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Plan settings given as flags.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    /// Enable duplicate elimination on every column.
    pub dedupe: bool,
    /// Enable duplicate elimination on these key columns.
    pub dedupe_on: Option<Vec<String>>,
    pub missing: Option<String>,
    /// Raw fill value; typed with [`Value::infer`].
    pub fill_value: Option<String>,
    pub missing_columns: Option<Vec<String>>,
    pub dates: Option<Vec<String>>,
}

/// Merges an optional plan file with flag overrides.
///
/// # Errors
///
/// Fails on an unknown strategy name, on `fill` without a fill value, and on
/// a non-scalar `fill_value` in the plan file.
pub fn build_plan(file: Option<PlanFile>, overrides: PlanOverrides) -> Result<CleaningPlan> {
    let file = file.unwrap_or_default();
    let mut plan = CleaningPlan::new();

    let dedupe_keys = match (overrides.dedupe_on, file.dedupe) {
        (Some(keys), _) => Some(Some(keys)),
        (None, Some(section)) => Some(section.keys),
        (None, None) if overrides.dedupe => Some(None),
        (None, None) => None,
    };
    if let Some(keys) = dedupe_keys {
        plan = plan.with_dedupe(keys);
    }

    let (file_strategy, file_fill, file_columns) = match file.missing {
        Some(section) => (Some(section.strategy), section.fill_value, section.columns),
        None => (None, None, None),
    };
    let fill_value = match overrides.fill_value {
        Some(raw) => Some(Value::infer(&raw)),
        None => match file_fill {
            Some(json) => json_fill_value(&json)?,
            None => None,
        },
    };
    let columns = overrides.missing_columns.or(file_columns);
    if let Some(name) = overrides.missing.or(file_strategy) {
        let strategy = MissingValueStrategy::from_name(&name, fill_value)?;
        plan = plan.with_missing(strategy, columns);
    } else if fill_value.is_some() || columns.is_some() {
        tracing::warn!("fill value and missing-value columns are ignored without a strategy");
    }

    Ok(plan.with_dates(overrides.dates.unwrap_or(file.dates)))
}

/// Converts a JSON scalar into a fill value. `null` means "not provided".
fn json_fill_value(json: &serde_json::Value) -> Result<Option<Value>> {
    let value = match json {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Bool(flag) => Value::Boolean(*flag),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(integer) => Value::Integer(integer),
            None => match number.as_f64() {
                Some(float) => Value::Float(float),
                None => bail!("fill_value {number} is out of range"),
            },
        },
        serde_json::Value::String(text) => Value::Text(text.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            bail!("fill_value must be a string, number or boolean")
        }
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fill_value_counts_as_missing() {
        assert_eq!(json_fill_value(&serde_json::Value::Null).unwrap(), None);
        assert_eq!(
            json_fill_value(&serde_json::json!(1.5)).unwrap(),
            Some(Value::Float(1.5))
        );
        assert!(json_fill_value(&serde_json::json!([0])).is_err());
    }
}
