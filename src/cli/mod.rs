//! Command-line interface for patient-grader.
//!
//! Provides the single grading command: wire a submission to the test
//! driver and append the run report.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli};
