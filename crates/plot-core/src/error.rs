// File: crates/plot-core/src/error.rs
// Summary: Error type for table access and reshaping failures.

use thiserror::Error;

/// Failures that abort a render instead of being skipped over.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("column '{column}' holds non-numeric value {value:?} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("duplicate pivot entry for ({index}, {category})")]
    DuplicatePivotKey { index: String, category: String },
}

impl PlotError {
    pub fn missing_column(column: impl Into<String>, headers: &[String]) -> Self {
        PlotError::MissingColumn {
            column: column.into(),
            available: headers.to_vec(),
        }
    }
}
