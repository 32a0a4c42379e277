//! Error types for the alleleqc library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for alleleqc operations.
///
/// Malformed data rows are never errors; they become `Rejected` outcomes.
/// These variants cover the conditions that abort an entire run.
#[derive(Debug, Error)]
pub enum AlleleQcError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library (load-file writing).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data rows to check.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Reference data could not be loaded or is inconsistent.
    #[error("Reference data error: {0}")]
    Reference(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for alleleqc operations.
pub type Result<T> = std::result::Result<T, AlleleQcError>;
