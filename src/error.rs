use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the load → filter → aggregate pipeline.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The city's source file is missing or unreadable.
    #[error("data source for {city} not found at {}: {reason}", .path.display())]
    DataSourceNotFound {
        city: String,
        path: PathBuf,
        reason: String,
    },

    /// A cell could not be coerced to the type its column requires.
    #[error("malformed record at row {row}: column '{column}' has invalid value '{value}'")]
    MalformedRecord {
        row: usize,
        column: String,
        value: String,
    },

    /// A required column is absent from the header row.
    #[error("source is missing the '{column}' column")]
    MissingColumn { column: &'static str },

    /// A statistic was requested over zero eligible rows.
    #[error("no data available to compute {statistic}")]
    EmptyAggregationInput { statistic: &'static str },
}

impl StatsError {
    pub(crate) fn malformed(row: usize, column: &str, value: &str) -> Self {
        StatsError::MalformedRecord {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn empty(statistic: &'static str) -> Self {
        StatsError::EmptyAggregationInput { statistic }
    }
}
