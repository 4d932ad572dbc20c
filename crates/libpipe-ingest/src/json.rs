//! JSON record loading.
//!
//! A document is either a list of objects, a single object, or an object
//! wrapping one of those under a record key. Nested objects flatten into
//! dotted column names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use libpipe_model::{Dataset, Value};
use serde_json::{Map, Value as JsonValue};

use crate::error::{IngestError, Result};
use crate::load::FileFormat;
use crate::observer::{LoadObserver, TracingObserver, observed};

/// Wrapper key unwrapped by default.
pub const DEFAULT_RECORD_KEY: &str = "events";

/// Options for JSON loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Top-level key whose value holds the records.
    pub record_key: String,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            record_key: DEFAULT_RECORD_KEY.to_string(),
        }
    }
}

impl JsonOptions {
    pub fn with_record_key(record_key: impl Into<String>) -> Self {
        Self {
            record_key: record_key.into(),
        }
    }
}

/// Loads a JSON file of records.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path is not an existing file
/// - [`IngestError::JsonParse`] for empty or syntactically invalid content
/// - [`IngestError::JsonShape`] when the content is not an object or a list
///   of objects
pub fn load_json(path: &Path, options: &JsonOptions) -> Result<Dataset> {
    load_json_with_observer(path, options, &TracingObserver)
}

pub fn load_json_with_observer(
    path: &Path,
    options: &JsonOptions,
    observer: &dyn LoadObserver,
) -> Result<Dataset> {
    observed(path, FileFormat::Json, observer, || read_json(path, options))
}

pub(crate) fn read_json(path: &Path, options: &JsonOptions) -> Result<Dataset> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: JsonValue =
        serde_json::from_str(&content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let source = match document {
        JsonValue::Object(mut map) => match map.remove(&options.record_key) {
            Some(inner) => inner,
            None => JsonValue::Object(map),
        },
        other => other,
    };
    records_to_dataset(path, source)
}

fn records_to_dataset(path: &Path, source: JsonValue) -> Result<Dataset> {
    let objects = match source {
        JsonValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                JsonValue::Object(map) => Ok(map),
                other => Err(shape_error(
                    path,
                    format!("element {idx} is {}, expected an object", json_kind(&other)),
                )),
            })
            .collect::<Result<Vec<_>>>()?,
        JsonValue::Object(map) => vec![map],
        other => {
            return Err(shape_error(
                path,
                format!("top-level value is {}", json_kind(&other)),
            ));
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<(usize, Value)>> = Vec::with_capacity(objects.len());
    for object in objects {
        let mut flat = Vec::new();
        flatten(None, object, &mut flat);
        let row = flat
            .into_iter()
            .map(|(name, value)| {
                let pos = *positions.entry(name).or_insert_with_key(|name| {
                    columns.push(name.clone());
                    columns.len() - 1
                });
                (pos, value)
            })
            .collect();
        rows.push(row);
    }

    let width = columns.len();
    let mut dataset = Dataset::new(columns).map_err(|e| IngestError::model(path, e))?;
    for row in rows {
        let mut values = vec![Value::Absent; width];
        for (pos, value) in row {
            values[pos] = value;
        }
        dataset
            .push_row(values)
            .map_err(|e| IngestError::model(path, e))?;
    }
    Ok(dataset)
}

fn flatten(prefix: Option<&str>, object: Map<String, JsonValue>, out: &mut Vec<(String, Value)>) {
    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };
        match value {
            JsonValue::Object(inner) => flatten(Some(&name), inner, out),
            other => out.push((name, scalar_value(other))),
        }
    }
}

fn scalar_value(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Absent,
        JsonValue::Bool(flag) => Value::Boolean(flag),
        JsonValue::Number(number) => number
            .as_i64()
            .map(Value::Integer)
            .or_else(|| number.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::Text(number.to_string())),
        JsonValue::String(text) => Value::Text(text),
        // Arrays keep their JSON text.
        array @ JsonValue::Array(_) => Value::Text(array.to_string()),
        object @ JsonValue::Object(_) => Value::Text(object.to_string()),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn shape_error(path: &Path, reason: String) -> IngestError {
    IngestError::JsonShape {
        path: path.to_path_buf(),
        reason,
    }
}
