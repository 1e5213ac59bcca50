//! In-memory patient table engine.
//!
//! Holds an ordered collection of five-column patient records, optionally
//! extended with a derived "Stay Category" column. The table is mutated in
//! place by successive manager operations and recreated wholesale on each
//! build call.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The five base columns, in positional order.
pub const BASE_COLUMNS: [&str; 5] = [
    "patient_id",
    "department",
    "admission_date",
    "discharge_date",
    "bill_amount",
];

/// Name of the derived categorical column.
pub const STAY_CATEGORY_COLUMN: &str = "Stay Category";

/// Date format accepted for admission and discharge dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single patient row. Five positional fields, order-significant,
/// immutable once supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: i64,
    pub department: String,
    /// Raw date text as supplied; parsed lazily so unparsable dates can be
    /// tolerated by categorization instead of rejected at build time.
    pub admission_date: String,
    pub discharge_date: String,
    pub bill_amount: f64,
}

impl PatientRecord {
    pub fn new(
        patient_id: i64,
        department: impl Into<String>,
        admission_date: impl Into<String>,
        discharge_date: impl Into<String>,
        bill_amount: f64,
    ) -> Self {
        Self {
            patient_id,
            department: department.into(),
            admission_date: admission_date.into(),
            discharge_date: discharge_date.into(),
            bill_amount,
        }
    }

    /// Length of stay in whole days, or `None` when either date fails to
    /// parse as `YYYY-MM-DD`.
    pub fn stay_length_days(&self) -> Option<i64> {
        let admission = NaiveDate::parse_from_str(&self.admission_date, DATE_FORMAT).ok()?;
        let discharge = NaiveDate::parse_from_str(&self.discharge_date, DATE_FORMAT).ok()?;
        Some((discharge - admission).num_days())
    }
}

/// Derived classification of length-of-stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayCategory {
    Short,
    Normal,
    Extended,
    Invalid,
}

impl StayCategory {
    /// Boundary rule: length <= 3 is Short, 3 < length <= 7 is Normal,
    /// length > 7 is Extended. Missing lengths (unparsable dates) are Invalid.
    pub fn from_stay_length(days: Option<i64>) -> Self {
        match days {
            None => StayCategory::Invalid,
            Some(d) if d <= 3 => StayCategory::Short,
            Some(d) if d <= 7 => StayCategory::Normal,
            Some(_) => StayCategory::Extended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StayCategory::Short => "Short Stay",
            StayCategory::Normal => "Normal Stay",
            StayCategory::Extended => "Extended Stay",
            StayCategory::Invalid => "Invalid Stay",
        }
    }
}

impl fmt::Display for StayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered collection of patient rows with an optional derived category
/// column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientTable {
    rows: Vec<PatientRecord>,
    /// Parallel to `rows` when present.
    stay_categories: Option<Vec<StayCategory>>,
}

impl PatientTable {
    /// Creates an empty table with the five base columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh table from the given rows, discarding any previously
    /// derived columns.
    pub fn from_rows(rows: Vec<PatientRecord>) -> Self {
        Self {
            rows,
            stay_categories: None,
        }
    }

    /// (row count, column count). The column count is 5 plus one for the
    /// derived category column when present.
    pub fn shape(&self) -> (usize, usize) {
        let cols = BASE_COLUMNS.len() + usize::from(self.stay_categories.is_some());
        (self.rows.len(), cols)
    }

    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the derived "Stay Category" column exists.
    pub fn has_stay_categories(&self) -> bool {
        self.stay_categories.is_some()
    }

    /// Derives the "Stay Category" column from the admission and discharge
    /// dates. Rows with unparsable dates land in `Invalid Stay`.
    pub fn derive_stay_categories(&mut self) {
        let categories = self
            .rows
            .iter()
            .map(|r| StayCategory::from_stay_length(r.stay_length_days()))
            .collect();
        self.stay_categories = Some(categories);
    }

    /// Distinct category values in order of first appearance, or `None` when
    /// the column has not been derived.
    pub fn distinct_stay_categories(&self) -> Option<Vec<String>> {
        let categories = self.stay_categories.as_ref()?;
        let mut distinct: Vec<String> = Vec::new();
        for category in categories {
            let value = category.as_str().to_string();
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        Some(distinct)
    }

    /// Returns a copy sorted by bill amount descending. The sort is stable,
    /// so ties keep their original relative order.
    pub fn sorted_by_bill_desc(&self) -> PatientTable {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| {
            self.rows[b]
                .bill_amount
                .partial_cmp(&self.rows[a].bill_amount)
                .unwrap_or(Ordering::Equal)
        });
        let rows = order.iter().map(|&i| self.rows[i].clone()).collect();
        let stay_categories = self
            .stay_categories
            .as_ref()
            .map(|c| order.iter().map(|&i| c[i]).collect());
        PatientTable {
            rows,
            stay_categories,
        }
    }

    /// Returns a copy holding at most the first `n` rows.
    pub fn head(&self, n: usize) -> PatientTable {
        let rows = self.rows.iter().take(n).cloned().collect();
        let stay_categories = self
            .stay_categories
            .as_ref()
            .map(|c| c.iter().take(n).copied().collect());
        PatientTable {
            rows,
            stay_categories,
        }
    }

    /// Patient id of the first row, if any.
    pub fn first_patient_id(&self) -> Option<i64> {
        self.rows.first().map(|r| r.patient_id)
    }

    /// Ids of rows whose bill amount strictly exceeds the threshold,
    /// preserving original row order.
    pub fn ids_with_bill_over(&self, threshold: f64) -> Vec<i64> {
        self.rows
            .iter()
            .filter(|r| r.bill_amount > threshold)
            .map(|r| r.patient_id)
            .collect()
    }
}
