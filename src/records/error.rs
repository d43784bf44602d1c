//! Data source error types
//!
//! Defines all errors that can occur while loading daily records.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching records from a data source
#[derive(Error, Debug)]
pub enum SourceError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file has no usable date column
    #[error("No date column found in {0:?}")]
    MissingDateColumn(PathBuf),

    /// Data source file does not exist
    #[error("Data file not found: {0:?}")]
    NotFound(PathBuf),
}

/// Result type alias for data source operations
pub type SourceResult<T> = Result<T, SourceError>;
