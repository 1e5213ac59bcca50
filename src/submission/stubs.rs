//! Canned non-genuine submissions.
//!
//! Used by tests and by the CLI's demonstration mode to show the integrity
//! heuristics firing: one submission that stubs every operation out, and one
//! that fakes a matching table shape without doing any column computation.

use crate::error::SubmissionFault;
use crate::table::{PatientRecord, PatientTable};

use super::PatientOps;

/// Manager whose operations all do nothing, mirroring a learner who left
/// every body as a bare stub.
#[derive(Debug, Default)]
pub struct EmptyStubManager {
    table: PatientTable,
}

impl EmptyStubManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientOps for EmptyStubManager {
    fn create_patient_table(&mut self, _rows: &[PatientRecord]) -> Result<(), SubmissionFault> {
        Ok(())
    }

    fn top_n_bills(&mut self, _n: usize) -> Result<PatientTable, SubmissionFault> {
        Ok(PatientTable::new())
    }

    fn categorize_stay_duration(&mut self) -> Result<(), SubmissionFault> {
        Ok(())
    }

    fn high_billing_patients(&mut self, _threshold: f64) -> Result<Vec<i64>, SubmissionFault> {
        Ok(Vec::new())
    }

    fn table(&self) -> &PatientTable {
        &self.table
    }
}

/// Source text matching [`EmptyStubManager`]: every operation body is a bare
/// `pass`.
pub const EMPTY_STUB_SOURCE: &str = r#"class PatientManager:
    def __init__(self):
        self.table = None

    def create_patient_table(self, rows):
        pass

    def top_n_bills(self, n):
        pass

    def categorize_stay_duration(self):
        pass

    def high_billing_patients(self, threshold):
        pass
"#;

/// Manager that fabricates a table with the right row count but blank
/// contents, so shape assertions pass without any real computation.
#[derive(Debug, Default)]
pub struct HardcodedShapeManager {
    table: PatientTable,
}

impl HardcodedShapeManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientOps for HardcodedShapeManager {
    fn create_patient_table(&mut self, rows: &[PatientRecord]) -> Result<(), SubmissionFault> {
        let blanks = rows
            .iter()
            .map(|_| PatientRecord::new(0, "", "", "", 0.0))
            .collect();
        self.table = PatientTable::from_rows(blanks);
        Ok(())
    }

    fn top_n_bills(&mut self, n: usize) -> Result<PatientTable, SubmissionFault> {
        Ok(self.table.head(n))
    }

    fn categorize_stay_duration(&mut self) -> Result<(), SubmissionFault> {
        Ok(())
    }

    fn high_billing_patients(&mut self, _threshold: f64) -> Result<Vec<i64>, SubmissionFault> {
        Ok(Vec::new())
    }

    fn table(&self) -> &PatientTable {
        &self.table
    }
}

/// Source text matching [`HardcodedShapeManager`]: shape bookkeeping only,
/// none of the markers a real table computation would leave behind.
pub const HARDCODED_SHAPE_SOURCE: &str = r#"struct PatientManager {
    n_rows: usize,
}

impl PatientManager {
    fn create_patient_table(&mut self, rows: &[Vec<String>]) {
        self.n_rows = rows.len();
    }

    fn top_n_bills(&mut self, n: usize) -> (usize, usize) {
        (n.min(self.n_rows), 5)
    }

    fn categorize_stay_duration(&mut self) -> (usize, usize) {
        (self.n_rows, 6)
    }

    fn high_billing_patients(&mut self, _threshold: f64) -> Vec<i64> {
        Vec::new()
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stub_builds_nothing() {
        let mut manager = EmptyStubManager::new();
        manager
            .create_patient_table(&[PatientRecord::new(1, "A", "2023-01-01", "2023-01-02", 5.0)])
            .expect("stub build should not fault");
        assert_eq!(manager.table().shape(), (0, 5));
    }

    #[test]
    fn test_hardcoded_shape_matches_row_count() {
        let mut manager = HardcodedShapeManager::new();
        manager
            .create_patient_table(&[
                PatientRecord::new(1, "A", "2023-01-01", "2023-01-02", 5.0),
                PatientRecord::new(2, "B", "2023-01-01", "2023-01-02", 6.0),
            ])
            .expect("build should not fault");
        assert_eq!(manager.table().shape(), (2, 5));
        assert_eq!(manager.table().first_patient_id(), Some(0));
    }
}
