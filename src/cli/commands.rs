//! CLI command definitions for patient-grader.
//!
//! One-shot grading: resolve the submission source, run the fixed test
//! suite, append the report. Exit code stays zero whether cases pass or
//! fail; only setup and I/O errors propagate.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::driver::TestDriver;
use crate::report::FileReportSink;
use crate::submission::{
    reference, stubs, EmptyStubManager, HardcodedShapeManager, PatientOps, ReferenceManager,
    Submission, SubmissionSource,
};

/// Default report file, relative to the working directory.
const DEFAULT_REPORT_PATH: &str = "student_workspace/report.txt";

/// Automated grading harness for the patient table manager exercise.
#[derive(Parser)]
#[command(name = "patient-grader")]
#[command(about = "Grade a patient table manager submission")]
#[command(version)]
#[command(
    long_about = "patient-grader runs a fixed battery of functional test cases and heuristic\nintegrity checks against a patient table manager submission, appending a\nhuman-readable report.\n\nExample usage:\n  patient-grader ./student_workspace/solution.py --report ./student_workspace/report.txt"
)]
pub struct Cli {
    /// Path to the submission's source file. When omitted, the source of
    /// the selected built-in implementation is graded.
    pub submission: Option<PathBuf>,

    /// Which built-in implementation backs the graded source.
    #[arg(long, value_enum, default_value = "reference")]
    pub implementation: Implementation,

    /// Report file to append to.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Print the run summary as JSON to stdout after grading.
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Built-in implementations available for grading runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Implementation {
    /// The genuine reference manager.
    Reference,
    /// Every operation body is a bare stub; trips the stub heuristic.
    Stub,
    /// Fakes matching table shapes; trips the hardcoded-shape heuristic.
    Hardcoded,
}

impl Implementation {
    fn ops(&self) -> Box<dyn PatientOps> {
        match self {
            Implementation::Reference => Box::new(ReferenceManager::new()),
            Implementation::Stub => Box::new(EmptyStubManager::new()),
            Implementation::Hardcoded => Box::new(HardcodedShapeManager::new()),
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            Implementation::Reference => reference::REFERENCE_SOURCE,
            Implementation::Stub => stubs::EMPTY_STUB_SOURCE,
            Implementation::Hardcoded => stubs::HARDCODED_SHAPE_SOURCE,
        }
    }
}

/// Parse CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parse arguments and run.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Run the grading command with already-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let source = match &cli.submission {
        Some(path) => SubmissionSource::from_path(path)?,
        None => SubmissionSource::new(cli.implementation.builtin_source()),
    };
    let mut submission = Submission::new(cli.implementation.ops(), source);

    let driver = TestDriver::new()?;
    let mut sink = FileReportSink::create(&cli.report)?;
    info!(report = %cli.report.display(), "grading submission");

    let summary = driver.evaluate(&mut submission, &mut sink)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    // No exit-code distinction between all-passed and some-failed; the
    // report is the outcome.
    Ok(())
}
