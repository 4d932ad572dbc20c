//! Duplicate elimination by key columns.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use libpipe_model::{Dataset, Value};

use crate::error::Result;

/// Hashable, orderable view of a cell used to build composite keys.
///
/// Absent cells compare equal to each other. Floats compare by value with
/// `-0.0 == 0.0` and every NaN equal to every other NaN.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart<'a> {
    Absent,
    Text(&'a str),
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Date(NaiveDate),
}

fn key_part(value: &Value) -> KeyPart<'_> {
    match value {
        Value::Absent => KeyPart::Absent,
        Value::Text(text) => KeyPart::Text(text),
        Value::Integer(v) => KeyPart::Integer(*v),
        Value::Float(v) => KeyPart::Float(float_key(*v)),
        Value::Boolean(v) => KeyPart::Boolean(*v),
        Value::Date(v) => KeyPart::Date(*v),
    }
}

fn float_key(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Keeps the first record for every distinct tuple of key values.
///
/// `subset` names the key columns; `None` keys on every column. Later records
/// with an already-seen key are discarded whole; nothing is merged into the
/// retained record.
///
/// # Errors
///
/// Fails with an unknown-column error if a key column is not in the dataset.
pub fn remove_duplicates<S: AsRef<str>>(dataset: &Dataset, subset: Option<&[S]>) -> Result<Dataset> {
    let keys = dataset.resolve_selection(subset)?;
    if dataset.is_empty() {
        return Ok(dataset.empty_like());
    }
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(dataset.height());
    for record in dataset.records() {
        let composite: Vec<KeyPart<'_>> = keys
            .iter()
            .map(|&pos| key_part(&record.values()[pos]))
            .collect();
        keep.push(seen.insert(composite));
    }
    Ok(dataset.filter_rows(|idx, _| keep[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_keys_treat_signed_zero_and_nan_as_equal() {
        assert_eq!(float_key(0.0), float_key(-0.0));
        assert_eq!(float_key(f64::NAN), float_key(-f64::NAN));
        assert_ne!(float_key(1.0), float_key(2.0));
    }

    #[test]
    fn absent_cells_share_a_key() {
        let dataset = Dataset::from_rows(
            ["id", "note"],
            vec![
                vec![Value::Integer(1), Value::Absent],
                vec![Value::Integer(1), Value::Absent],
                vec![Value::Integer(1), Value::from("")],
            ],
        )
        .unwrap();
        let result = remove_duplicates::<&str>(&dataset, None).unwrap();
        assert_eq!(result.height(), 2);
        assert_eq!(result.get(1, "note"), Some(&Value::from("")));
    }
}
