//! Reference implementation of the patient table manager.
//!
//! Recovered behavior: dates are normalized lazily, unparsable dates are
//! tolerated by coercion, and coerced rows land in the "Invalid Stay"
//! category during categorization.

use crate::error::SubmissionFault;
use crate::table::{PatientRecord, PatientTable};

use super::PatientOps;

/// The genuine manager the harness ships with.
#[derive(Debug, Default)]
pub struct ReferenceManager {
    table: PatientTable,
}

impl ReferenceManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientOps for ReferenceManager {
    fn create_patient_table(&mut self, rows: &[PatientRecord]) -> Result<(), SubmissionFault> {
        self.table = PatientTable::from_rows(rows.to_vec());
        Ok(())
    }

    fn top_n_bills(&mut self, n: usize) -> Result<PatientTable, SubmissionFault> {
        Ok(self.table.sorted_by_bill_desc().head(n))
    }

    fn categorize_stay_duration(&mut self) -> Result<(), SubmissionFault> {
        self.table.derive_stay_categories();
        Ok(())
    }

    fn high_billing_patients(&mut self, threshold: f64) -> Result<Vec<i64>, SubmissionFault> {
        Ok(self.table.ids_with_bill_over(threshold))
    }

    fn table(&self) -> &PatientTable {
        &self.table
    }
}

/// Source text of this file, embedded so the built-in reference can be
/// graded (integrity checks included) without an external submission file.
pub const REFERENCE_SOURCE: &str = include_str!("reference.rs");

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<PatientRecord> {
        vec![
            PatientRecord::new(101, "Cardiology", "2023-01-10", "2023-01-13", 450.0),
            PatientRecord::new(102, "Neurology", "2023-01-11", "2023-01-18", 300.0),
        ]
    }

    #[test]
    fn test_build_then_query() {
        let mut manager = ReferenceManager::new();
        manager
            .create_patient_table(&sample_rows())
            .expect("build should succeed");
        assert_eq!(manager.table().shape(), (2, 5));

        let top = manager.top_n_bills(1).expect("top-n should succeed");
        assert_eq!(top.first_patient_id(), Some(101));

        manager
            .categorize_stay_duration()
            .expect("categorize should succeed");
        assert_eq!(
            manager.table().distinct_stay_categories(),
            Some(vec!["Short Stay".to_string(), "Normal Stay".to_string()])
        );

        let ids = manager
            .high_billing_patients(300.0)
            .expect("filter should succeed");
        assert_eq!(ids, vec![101]);
    }

    #[test]
    fn test_unparsable_dates_become_invalid_stay() {
        let mut manager = ReferenceManager::new();
        manager
            .create_patient_table(&[PatientRecord::new(7, "ER", "13/01/2023", "soon", 10.0)])
            .expect("build should succeed");
        manager
            .categorize_stay_duration()
            .expect("categorize should succeed");
        assert_eq!(
            manager.table().distinct_stay_categories(),
            Some(vec!["Invalid Stay".to_string()])
        );
    }
}
