//! Cell values.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    /// No data for this cell. Distinct from an empty string and from zero.
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Canonical calendar date.
    Date(NaiveDate),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Short name of the variant, used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
        }
    }

    /// Infers a typed value from raw text.
    ///
    /// Integers win over floats, floats must be finite, and `true`/`false`
    /// are matched case-insensitively. Anything else stays text. Surrounding
    /// whitespace is trimmed before inference but kept for text values.
    ///
    /// ```
    /// use libpipe_model::Value;
    ///
    /// assert_eq!(Value::infer("42"), Value::Integer(42));
    /// assert_eq!(Value::infer(" 2.5 "), Value::Float(2.5));
    /// assert_eq!(Value::infer("TRUE"), Value::Boolean(true));
    /// assert_eq!(Value::infer("Dune"), Value::Text("Dune".to_string()));
    /// ```
    pub fn infer(raw: &str) -> Value {
        let trimmed = raw.trim();
        if let Some(value) = parse_i64(trimmed) {
            return Value::Integer(value);
        }
        if let Some(value) = parse_f64(trimmed) {
            return Value::Float(value);
        }
        if let Some(value) = parse_bool(trimmed) {
            return Value::Boolean(value);
        }
        Value::Text(raw.to_string())
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parses a string as a finite f64.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses `true`/`false` in any letter case.
pub fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Text(text) => f.write_str(text),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => f.write_str(&format_numeric(*v)),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_rejects_non_finite_floats() {
        assert_eq!(Value::infer("NaN"), Value::Text("NaN".to_string()));
        assert_eq!(Value::infer("inf"), Value::Text("inf".to_string()));
    }

    #[test]
    fn display_renders_absent_as_empty() {
        assert_eq!(Value::Absent.to_string(), "");
        assert_eq!(Value::Float(20.0).to_string(), "20");
        assert_eq!(Value::Float(2.50).to_string(), "2.5");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).to_string(),
            "2024-03-09"
        );
    }

    #[test]
    fn option_maps_none_to_absent() {
        assert_eq!(Value::from(None::<&str>), Value::Absent);
        assert_eq!(Value::from(Some(7)), Value::Integer(7));
    }
}
