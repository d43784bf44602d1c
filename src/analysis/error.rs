//! Analysis error types

use crate::records::SourceError;
use thiserror::Error;

/// Errors that abort an analysis run
///
/// Per-pair sample shortfalls, zero variance and unparseable dates are not
/// errors: they degrade the result and the run continues.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Too few records to run a correlation analysis
    #[error("Insufficient data: need at least {required} records, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Year outside the supported calendar range
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// The data source could not deliver a snapshot
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// The worker running the computation failed
    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    /// Stable category name for callers and API clients
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InsufficientData { .. } => "insufficient_data",
            AnalysisError::InvalidYear(_) => "invalid_year",
            AnalysisError::Source(_) => "data_source",
            AnalysisError::Task(_) => "task",
        }
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::Task(err.to_string())
    }
}

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
