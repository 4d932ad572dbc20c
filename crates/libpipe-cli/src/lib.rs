//! CLI library components for the library data pipeline.

pub mod logging;
pub mod plan;
