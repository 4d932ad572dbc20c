//! Pipeline composition: duplicates, then missing values, then dates.

use libpipe_model::Dataset;
use serde::Serialize;

use crate::dates::{UnparsedDate, standardize_dates};
use crate::dedupe::remove_duplicates;
use crate::error::Result;
use crate::missing::{MissingValueStrategy, handle_missing_values};

/// Duplicate-elimination stage configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupeStep {
    /// Key columns; every column when `None`.
    pub keys: Option<Vec<String>>,
}

/// Missing-value stage configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingStep {
    pub strategy: MissingValueStrategy,
    /// Columns to inspect; every column when `None`.
    pub columns: Option<Vec<String>>,
}

/// Which cleaning stages to run and how.
///
/// Stages always run in pipeline order. A stage left unset is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningPlan {
    pub dedupe: Option<DedupeStep>,
    pub missing: Option<MissingStep>,
    pub date_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Dedupe,
    Missing,
    Dates,
}

/// Row and absent-cell counts around one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
    pub absent_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub stages: Vec<StageReport>,
    pub unparsed_dates: Vec<UnparsedDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub dataset: Dataset,
    pub report: CleaningReport,
}

impl CleaningPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables duplicate elimination on `keys` (every column when `None`).
    #[must_use]
    pub fn with_dedupe(mut self, keys: Option<Vec<String>>) -> Self {
        self.dedupe = Some(DedupeStep { keys });
        self
    }

    #[must_use]
    pub fn with_missing(
        mut self,
        strategy: MissingValueStrategy,
        columns: Option<Vec<String>>,
    ) -> Self {
        self.missing = Some(MissingStep { strategy, columns });
        self
    }

    #[must_use]
    pub fn with_dates(mut self, columns: Vec<String>) -> Self {
        self.date_columns = columns;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dedupe.is_none() && self.missing.is_none() && self.date_columns.is_empty()
    }

    /// Checks every column the plan names against the dataset.
    ///
    /// No stage adds or removes columns, so a plan that validates against the
    /// input cannot fail on columns later.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        if let Some(DedupeStep {
            keys: Some(keys), ..
        }) = &self.dedupe
        {
            dataset.resolve_columns(keys.as_slice())?;
        }
        if let Some(MissingStep {
            columns: Some(columns),
            ..
        }) = &self.missing
        {
            dataset.resolve_columns(columns.as_slice())?;
        }
        dataset.resolve_columns(self.date_columns.as_slice())?;
        Ok(())
    }

    /// Runs the configured stages over `dataset`.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported before any stage runs.
    pub fn run(&self, dataset: &Dataset) -> Result<CleaningOutcome> {
        self.validate(dataset)?;
        let mut stages = Vec::new();
        let mut current = dataset.clone();

        if let Some(step) = &self.dedupe {
            let next = remove_duplicates(&current, step.keys.as_deref())?;
            stages.push(stage_report(Stage::Dedupe, &current, &next));
            current = next;
        }

        if let Some(step) = &self.missing {
            let next = handle_missing_values(&current, &step.strategy, step.columns.as_deref())?;
            stages.push(stage_report(Stage::Missing, &current, &next));
            current = next;
        }

        let mut unparsed_dates = Vec::new();
        if !self.date_columns.is_empty() {
            let normalized = standardize_dates(&current, self.date_columns.as_slice())?;
            stages.push(stage_report(Stage::Dates, &current, &normalized.dataset));
            unparsed_dates = normalized.unparsed;
            current = normalized.dataset;
        }

        Ok(CleaningOutcome {
            report: CleaningReport {
                input_rows: dataset.height(),
                output_rows: current.height(),
                stages,
                unparsed_dates,
            },
            dataset: current,
        })
    }
}

fn stage_report(stage: Stage, before: &Dataset, after: &Dataset) -> StageReport {
    StageReport {
        stage,
        rows_in: before.height(),
        rows_out: after.height(),
        absent_cells: after.absent_counts().iter().map(|(_, count)| count).sum(),
    }
}
