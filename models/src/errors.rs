// models/src/errors.rs

use std::io;
pub use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The windowing configuration is unusable. Fatal: surfaced to the
    /// caller before any record is processed.
    #[error("invalid window configuration: {0}")]
    InvalidWindowConfiguration(String),

    /// A record lacks a valid source or target id. Recovered locally by
    /// skipping the record; the skip is counted in the run report.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A snapshot has zero nodes. Recovered by reporting sentinel metric
    /// values; the occurrence is counted in the analysis report.
    #[error("snapshot over window starting at {0} has no nodes")]
    EmptyGraph(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("export error: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(format!("JSON processing error: {}", err))
    }
}

/// A validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// An invalid value was provided where a specific value or format was
    /// expected.
    #[error("invalid value provided")]
    InvalidValue,
    /// A user id has an invalid length.
    #[error("user id has invalid length")]
    InvalidUserIdLength,
    /// A timestamp string could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// An interaction kind string is not one of the recognized kinds.
    #[error("unknown interaction kind: {0}")]
    UnknownInteractionKind(String),
}

/// A type alias for a `Result` that returns a `GraphError` on failure.
pub type GraphResult<T> = Result<T, GraphError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
