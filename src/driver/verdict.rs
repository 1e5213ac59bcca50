//! Per-case verdicts and the run summary.

use serde::{Deserialize, Serialize};

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseVerdict {
    /// Functional check held and no heuristic flag was raised.
    Passed {
        index: usize,
        description: String,
        result: String,
    },
    /// Functional check evaluated to false.
    Failed {
        index: usize,
        description: String,
        result: String,
    },
    /// A heuristic flag was raised; takes precedence over the functional
    /// result.
    Flagged {
        index: usize,
        description: String,
        reason: String,
    },
    /// A fault was raised while invoking the submission.
    Crashed {
        index: usize,
        description: String,
        error: String,
    },
}

impl CaseVerdict {
    /// Renders the report line for this verdict.
    pub fn report_line(&self) -> String {
        match self {
            CaseVerdict::Passed {
                index,
                description,
                result,
            } => format!("✅ Test Case {index} Passed: {description} | Result={result}"),
            CaseVerdict::Failed {
                index,
                description,
                result,
            } => format!("❌ Test Case {index} Failed: {description} | Result={result}"),
            CaseVerdict::Flagged {
                index,
                description,
                reason,
            } => format!(
                "❌ Test Case {index} Failed: {description} | Reason: Edge case validation failed - {reason}"
            ),
            CaseVerdict::Crashed {
                index,
                description,
                error,
            } => format!("❌ Test Case {index} Crashed: {description} | Error={error}"),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CaseVerdict::Passed { .. })
    }

    pub fn is_crash(&self) -> bool {
        matches!(self, CaseVerdict::Crashed { .. })
    }
}

/// Aggregate outcome of one grading run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
    pub verdicts: Vec<CaseVerdict>,
}

impl RunSummary {
    /// Builds a summary from per-case verdicts. Flagged cases count as
    /// failed.
    pub fn from_verdicts(verdicts: Vec<CaseVerdict>) -> Self {
        let passed = verdicts.iter().filter(|v| v.is_pass()).count();
        let crashed = verdicts.iter().filter(|v| v.is_crash()).count();
        Self {
            total: verdicts.len(),
            passed,
            failed: verdicts.len() - passed - crashed,
            crashed,
            verdicts,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Pass rate as a percentage.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
