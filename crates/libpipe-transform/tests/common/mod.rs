#![allow(dead_code)]

use libpipe_model::{Dataset, Value};

/// Builds a dataset column by column.
pub fn frame(columns: Vec<(&str, Vec<Value>)>) -> Dataset {
    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let height = columns.first().map_or(0, |(_, values)| values.len());
    let rows = (0..height).map(|row| {
        columns
            .iter()
            .map(|(_, values)| values[row].clone())
            .collect::<Vec<_>>()
    });
    Dataset::from_rows(names, rows).expect("build dataset")
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Integer(v)).collect()
}

pub fn texts(values: &[Option<&str>]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

pub fn opt_ints(values: &[Option<i64>]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

/// Records with duplicated ids `[1, 2, 2, 3, 3, 3]`.
pub fn with_duplicates() -> Dataset {
    frame(vec![
        ("id", ints(&[1, 2, 2, 3, 3, 3])),
        (
            "name",
            texts(&[
                Some("Alice"),
                Some("Bob"),
                Some("Bob"),
                Some("Charlie"),
                Some("Charlie"),
                Some("Charlie"),
            ]),
        ),
        ("value", ints(&[10, 20, 20, 30, 30, 30])),
    ])
}

/// One absent `name` (row 1) and one absent `value` (row 2).
pub fn with_missing() -> Dataset {
    frame(vec![
        ("id", ints(&[1, 2, 3, 4])),
        (
            "name",
            texts(&[Some("Alice"), None, Some("Charlie"), Some("David")]),
        ),
        ("value", opt_ints(&[Some(10), Some(20), None, Some(40)])),
    ])
}
