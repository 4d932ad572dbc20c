//! Error types for cleaning stages.

use libpipe_model::ModelError;
use thiserror::Error;

/// Invalid configuration of a cleaning stage.
///
/// All variants are raised before any data is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Strategy name is not one of the known strategies.
    #[error("Unknown strategy '{name}' (expected one of: drop, fill, forward_fill)")]
    UnknownStrategy { name: String },

    /// A strategy was selected without an option it requires.
    #[error("{option} must be provided when strategy='{strategy}'")]
    MissingOption {
        strategy: &'static str,
        option: &'static str,
    },

    /// Column selection or dataset construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
