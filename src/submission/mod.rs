//! The consumed submission interface.
//!
//! A submission is a class-like unit exposing four table operations, loaded
//! as a plugin behind the [`PatientOps`] trait so each call crosses a narrow,
//! fault-isolated boundary. Alongside the operations the driver needs the
//! submission's raw source text, which the integrity heuristics inspect
//! independently of any behavior.

pub mod reference;
pub mod stubs;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, SubmissionFault};
use crate::table::{PatientRecord, PatientTable};

pub use reference::ReferenceManager;
pub use stubs::{EmptyStubManager, HardcodedShapeManager};

/// The four operations every submission must expose, by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreatePatientTable,
    TopNBills,
    CategorizeStayDuration,
    HighBillingPatients,
}

impl Operation {
    /// The name the driver looks for in the submission's source text.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreatePatientTable => "create_patient_table",
            Operation::TopNBills => "top_n_bills",
            Operation::CategorizeStayDuration => "categorize_stay_duration",
            Operation::HighBillingPatients => "high_billing_patients",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The patient table manager contract.
///
/// Every call returns a `Result` so faults stay isolated per invocation;
/// the driver records an `Err` as a crashed verdict and keeps going.
pub trait PatientOps {
    /// Rebuilds the table wholesale from the given rows.
    fn create_patient_table(&mut self, rows: &[PatientRecord]) -> Result<(), SubmissionFault>;

    /// The first `n` rows after sorting by bill amount descending.
    fn top_n_bills(&mut self, n: usize) -> Result<PatientTable, SubmissionFault>;

    /// Derives the "Stay Category" column in place.
    fn categorize_stay_duration(&mut self) -> Result<(), SubmissionFault>;

    /// Ids of rows whose bill strictly exceeds the threshold, in original
    /// row order.
    fn high_billing_patients(&mut self, threshold: f64) -> Result<Vec<i64>, SubmissionFault>;

    /// The manager's current table, read directly by the driver.
    fn table(&self) -> &PatientTable;
}

/// Raw source text of a submission.
///
/// Operation bodies are located with a lightweight text scan so the
/// integrity checks work on source in any language: from the first
/// occurrence of the operation name, a brace-delimited block is taken when
/// one opens before the next function definition, otherwise the text up to
/// the next `fn `/`def ` line. A heuristic, same as everything built on it.
#[derive(Debug, Clone)]
pub struct SubmissionSource {
    text: String,
}

impl SubmissionSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_path(path: &Path) -> Result<Self, DriverError> {
        let text = fs::read_to_string(path).map_err(|source| DriverError::SourceRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source text of the named operation, or `None` when the name does not
    /// appear at all.
    pub fn operation_text(&self, op: Operation) -> Option<&str> {
        let start = self.text.find(op.name())?;
        let rest = &self.text[start..];
        let boundary = next_definition_boundary(rest);

        if let Some(open) = rest.find('{') {
            if boundary.map_or(true, |b| open < b) {
                if let Some(close) = matching_brace(rest, open) {
                    return Some(&rest[..=close]);
                }
            }
        }

        match boundary {
            Some(b) => Some(&rest[..b]),
            None => Some(rest),
        }
    }
}

/// Byte offset of the next line that starts another function definition.
fn next_definition_boundary(text: &str) -> Option<usize> {
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i > 0 {
            let trimmed = line.trim_start();
            if trimmed.starts_with("def ") || trimmed.starts_with("fn ") {
                return Some(offset);
            }
        }
        offset += line.len();
    }
    None
}

/// Index of the brace matching the one at `open`, by depth counting.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices().skip_while(|&(i, _)| i < open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// A loaded submission: the plugin implementation paired with its source.
pub struct Submission {
    ops: Box<dyn PatientOps>,
    source: SubmissionSource,
}

impl Submission {
    pub fn new(ops: Box<dyn PatientOps>, source: SubmissionSource) -> Self {
        Self { ops, source }
    }

    /// The built-in reference implementation graded against its own source.
    pub fn reference() -> Self {
        Self::new(
            Box::new(ReferenceManager::new()),
            SubmissionSource::new(reference::REFERENCE_SOURCE),
        )
    }

    pub fn ops_mut(&mut self) -> &mut dyn PatientOps {
        &mut *self.ops
    }

    pub fn source(&self) -> &SubmissionSource {
        &self.source
    }

    pub fn table(&self) -> &PatientTable {
        self.ops.table()
    }
}
