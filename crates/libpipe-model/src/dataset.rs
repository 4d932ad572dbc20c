//! Row-ordered tabular dataset.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::value::Value;

/// One row of a [`Dataset`], holding one value per dataset column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Returns true if any of the given column positions holds an absent value.
    pub fn has_absent_in(&self, positions: &[usize]) -> bool {
        positions
            .iter()
            .any(|&pos| self.values.get(pos).is_some_and(Value::is_absent))
    }
}

/// An ordered sequence of records sharing a fixed column set.
///
/// Every record holds exactly one value per column; construction rejects
/// ragged rows. Row order is significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset with the given columns.
    ///
    /// # Errors
    ///
    /// Fails on blank or repeated column names.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for column in &columns {
            if column.trim().is_empty() {
                return Err(ModelError::EmptyColumnName);
            }
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            records: Vec::new(),
        })
    }

    /// Builds a dataset from columns and positional rows.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<Self> {
        let mut dataset = Self::new(columns)?;
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RaggedRecord`] if the row length differs from the
    /// column count.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(ModelError::RaggedRecord {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.records.push(Record { values });
        Ok(())
    }

    /// A dataset with the same columns and no rows.
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            records: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.records.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Resolves column names to positions, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownColumn`] for the first name not present.
    pub fn resolve_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| ModelError::UnknownColumn {
                        column: name.to_string(),
                    })
            })
            .collect()
    }

    /// Resolves an optional selection, defaulting to every column.
    pub fn resolve_selection<S: AsRef<str>>(&self, names: Option<&[S]>) -> Result<Vec<usize>> {
        match names {
            Some(names) => self.resolve_columns(names),
            None => Ok((0..self.columns.len()).collect()),
        }
    }

    /// Value at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let position = self.column_index(column)?;
        self.records.get(row)?.get(position)
    }

    /// Mutable access to a single cell, by position.
    pub fn cell_mut(&mut self, row: usize, position: usize) -> Option<&mut Value> {
        self.records.get_mut(row)?.values.get_mut(position)
    }

    /// All values of the named column in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<&Value>> {
        let position = self
            .column_index(column)
            .ok_or_else(|| ModelError::UnknownColumn {
                column: column.to_string(),
            })?;
        Ok(self
            .records
            .iter()
            .map(|record| &record.values[position])
            .collect())
    }

    /// A new dataset holding the records for which `keep` returns true.
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize, &Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .enumerate()
            .filter(|(idx, record)| keep(*idx, record))
            .map(|(_, record)| record.clone())
            .collect();
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    /// The first `n` records.
    pub fn head(&self, n: usize) -> Self {
        self.filter_rows(|idx, _| idx < n)
    }

    /// Number of absent cells per column, in column order.
    pub fn absent_counts(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(pos, column)| {
                let count = self
                    .records
                    .iter()
                    .filter(|record| record.values[pos].is_absent())
                    .count();
                (column.as_str(), count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            ["id", "title"],
            vec![
                vec![Value::Integer(1), Value::from("Dune")],
                vec![Value::Integer(2), Value::Absent],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut dataset = Dataset::new(["id", "title"]).unwrap();
        let err = dataset.push_row(vec![Value::Integer(1)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::RaggedRecord {
                expected: 2,
                found: 1
            }
        );
        assert!(dataset.is_empty());
    }

    #[test]
    fn rejects_duplicate_and_blank_columns() {
        assert_eq!(
            Dataset::new(["id", "id"]).unwrap_err(),
            ModelError::DuplicateColumn {
                column: "id".to_string()
            }
        );
        assert_eq!(
            Dataset::new(["id", " "]).unwrap_err(),
            ModelError::EmptyColumnName
        );
    }

    #[test]
    fn resolves_columns_in_given_order() {
        let dataset = sample();
        assert_eq!(dataset.resolve_columns(&["title", "id"]).unwrap(), vec![1, 0]);
        assert_eq!(
            dataset.resolve_columns(&["isbn"]).unwrap_err(),
            ModelError::UnknownColumn {
                column: "isbn".to_string()
            }
        );
        assert_eq!(
            dataset.resolve_selection::<String>(None).unwrap(),
            vec![0, 1]
        );
    }

    #[test]
    fn filter_rows_leaves_source_untouched() {
        let dataset = sample();
        let filtered = dataset.filter_rows(|_, record| !record.has_absent_in(&[1]));
        assert_eq!(filtered.height(), 1);
        assert_eq!(dataset.height(), 2);
        assert_eq!(filtered.columns(), dataset.columns());
    }

    #[test]
    fn counts_absent_cells() {
        let dataset = sample();
        assert_eq!(dataset.absent_counts(), vec![("id", 0), ("title", 1)]);
    }
}
