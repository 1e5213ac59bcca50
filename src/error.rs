//! Error types for the grading harness.
//!
//! Two tiers per the error handling design: assertion failures are ordinary
//! verdict data, never errors; faults raised while invoking a submission
//! operation surface as [`SubmissionFault`] and are caught at the per-case
//! boundary. [`DriverError`] and [`ReportError`] cover harness setup and
//! report I/O, the only errors allowed to reach the binary boundary.

use thiserror::Error;

/// Fault raised while invoking a submission operation. Caught per test case
/// and recorded as a "crashed" verdict; never aborts the remaining cases.
#[derive(Debug, Error)]
pub enum SubmissionFault {
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Table has no rows")]
    EmptyTable,

    #[error("Operation '{0}' is not implemented")]
    NotImplemented(String),

    #[error("{0}")]
    Other(String),
}

/// Errors from the append-only report sink.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create report directory '{path}': {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to open report file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while setting up or running an evaluation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to read submission source '{path}': {source}")]
    SourceRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid integrity marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}
