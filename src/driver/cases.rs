//! The fixed test suite.
//!
//! Test cases and edge cases are static data: defined once, run in
//! declaration order, 1-indexed for reporting, never mutated.

use serde::{Deserialize, Serialize};

use crate::submission::Operation;
use crate::table::PatientRecord;

/// Input value handed to a test case's target operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseInput {
    Rows(Vec<PatientRecord>),
    Count(usize),
    Threshold(f64),
    None,
}

/// Expected-outcome predicate for a test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Exact table shape after the build operation.
    Shape { rows: usize, cols: usize },
    /// Patient id of the first row after sorting by bill descending.
    FirstPatientId(i64),
    /// The "Stay Category" column exists.
    ColumnPresent,
    /// Every listed category appears among the column's distinct values.
    Categories(Vec<String>),
    /// Exact, order-sensitive filtered id list.
    PatientIds(Vec<i64>),
}

/// One functional test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub description: String,
    pub operation: Operation,
    pub input: CaseInput,
    pub expectation: Expectation,
}

/// Shape probe carried by the hardcoded-result edge case: rebuild with this
/// input and compare the resulting shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeProbe {
    pub input: Vec<PatientRecord>,
    pub expected_rows: usize,
    pub expected_cols: usize,
}

/// A heuristic check paired with a target operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeCase {
    pub description: String,
    pub operation: Operation,
    /// Present only for the hardcoded-shape probe.
    pub probe: Option<ShapeProbe>,
}

fn sample_rows() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new(101, "Cardiology", "2023-01-10", "2023-01-13", 450.0),
        PatientRecord::new(102, "Neurology", "2023-01-11", "2023-01-18", 300.0),
    ]
}

/// The fixed five-case functional suite.
pub fn default_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            description: "Create Patient DataFrame".to_string(),
            operation: Operation::CreatePatientTable,
            input: CaseInput::Rows(sample_rows()),
            expectation: Expectation::Shape { rows: 2, cols: 5 },
        },
        TestCase {
            description: "Fetch Top 1 Bill".to_string(),
            operation: Operation::TopNBills,
            input: CaseInput::Count(1),
            expectation: Expectation::FirstPatientId(101),
        },
        TestCase {
            description: "Stay Duration Categorization".to_string(),
            operation: Operation::CategorizeStayDuration,
            input: CaseInput::None,
            expectation: Expectation::ColumnPresent,
        },
        TestCase {
            description: "High Billing Patients (Hidden)".to_string(),
            operation: Operation::HighBillingPatients,
            input: CaseInput::Threshold(300.0),
            expectation: Expectation::PatientIds(vec![101]),
        },
        TestCase {
            description: "Edge Stay Duration Categorization (Hidden)".to_string(),
            operation: Operation::CategorizeStayDuration,
            input: CaseInput::None,
            expectation: Expectation::Categories(vec![
                "Short Stay".to_string(),
                "Normal Stay".to_string(),
                "Extended Stay".to_string(),
            ]),
        },
    ]
}

/// The fixed heuristic edge cases: one stub check per operation, plus one
/// hardcoded-shape probe on the build operation.
pub fn default_edge_cases() -> Vec<EdgeCase> {
    vec![
        EdgeCase {
            description: "Function contains only pass".to_string(),
            operation: Operation::CreatePatientTable,
            probe: None,
        },
        EdgeCase {
            description: "Function contains only pass".to_string(),
            operation: Operation::TopNBills,
            probe: None,
        },
        EdgeCase {
            description: "Function contains only pass".to_string(),
            operation: Operation::CategorizeStayDuration,
            probe: None,
        },
        EdgeCase {
            description: "Function contains only pass".to_string(),
            operation: Operation::HighBillingPatients,
            probe: None,
        },
        EdgeCase {
            description: "Hardcoded return".to_string(),
            operation: Operation::CreatePatientTable,
            probe: Some(ShapeProbe {
                input: vec![PatientRecord::new(
                    101,
                    "Cardiology",
                    "2023-01-10",
                    "2023-01-13",
                    450.0,
                )],
                expected_rows: 1,
                expected_cols: 5,
            }),
        },
    ]
}
