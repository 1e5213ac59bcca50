//! patient-grader: automated grading harness for the patient table manager
//! exercise.
//!
//! This library loads a learner submission (a plugin behind the
//! [`submission::PatientOps`] trait plus its raw source text), runs a fixed
//! battery of functional test cases and heuristic integrity checks against
//! it, and appends a human-readable report to an injected sink.

// Core modules
pub mod cli;
pub mod driver;
pub mod error;
pub mod integrity;
pub mod report;
pub mod submission;
pub mod table;

// Re-export commonly used error types
pub use error::{DriverError, ReportError, SubmissionFault};
