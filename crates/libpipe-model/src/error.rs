use thiserror::Error;

/// Errors raised while building or addressing a dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A referenced column is not part of the dataset.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// The same column name was given twice.
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// A column name was empty or whitespace.
    #[error("column names must not be empty")]
    EmptyColumnName,

    /// A record does not have one value per column.
    #[error("record has {found} values but the dataset has {expected} columns")]
    RaggedRecord { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
