//! Heuristic integrity checks over submission source text.
//!
//! Two detectors, both operating on a normalized (whitespace-stripped,
//! lowercased) view of one operation's source:
//!
//! - **Stub check**: a short body containing a stub marker is assumed to be
//!   an unimplemented placeholder.
//! - **Computation markers**: source that never mentions any recognizable
//!   table computation is assumed to be returning literal values; combined
//!   with a shape probe by the driver, this flags hardcoded results.
//!
//! These are heuristics, not correctness guarantees. A determined learner
//! can defeat them; their job is to catch the trivial cases cheaply.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

/// Flag reason for a bare-stub operation body.
pub const STUB_REASON: &str = "Function contains only pass";

/// Flag reason for a shape-matching result with no computation markers.
pub const HARDCODED_SHAPE_REASON: &str = "Hardcoded return shape";

/// Configuration for the integrity heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Substrings that mark an operation body as a stub.
    pub stub_markers: Vec<String>,
    /// Normalized bodies shorter than this qualify for the stub check.
    pub max_stub_len: usize,
    /// Regex patterns recognizing real table computation, matched against
    /// the normalized source.
    pub computation_markers: Vec<String>,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            stub_markers: vec![
                "pass".to_string(),
                "todo!".to_string(),
                "unimplemented!".to_string(),
            ],
            max_stub_len: 80,
            computation_markers: vec![
                "patienttable".to_string(),
                "dataframe".to_string(),
                "columns".to_string(),
                r"pd\.".to_string(),
                r"push\(".to_string(),
                r"collect\(".to_string(),
            ],
        }
    }
}

impl IntegrityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stub marker substring.
    pub fn with_stub_marker(mut self, marker: &str) -> Self {
        self.stub_markers.push(marker.to_lowercase());
        self
    }

    /// Adds a computation marker pattern.
    pub fn with_computation_marker(mut self, pattern: &str) -> Self {
        self.computation_markers.push(pattern.to_string());
        self
    }

    /// Sets the normalized-length bound for the stub check.
    pub fn with_max_stub_len(mut self, len: usize) -> Self {
        self.max_stub_len = len;
        self
    }
}

/// Strips all whitespace and lowercases, the canonical form both detectors
/// match against.
pub fn normalize_source(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Compiled integrity checker.
pub struct IntegrityChecker {
    config: IntegrityConfig,
    computation_markers: Vec<Regex>,
}

impl IntegrityChecker {
    /// Compiles the config's marker patterns up front, so an invalid pattern
    /// fails the run before any case executes.
    pub fn new(config: IntegrityConfig) -> Result<Self, DriverError> {
        let computation_markers = config
            .computation_markers
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            computation_markers,
        })
    }

    pub fn with_defaults() -> Result<Self, DriverError> {
        Self::new(IntegrityConfig::default())
    }

    pub fn config(&self) -> &IntegrityConfig {
        &self.config
    }

    /// Returns the flag reason when the operation body looks like a bare
    /// stub: shorter than the bound and containing a stub marker.
    pub fn check_stub(&self, op_source: &str) -> Option<&'static str> {
        let normalized = normalize_source(op_source);
        if normalized.len() < self.config.max_stub_len
            && self
                .config
                .stub_markers
                .iter()
                .any(|m| normalized.contains(m))
        {
            Some(STUB_REASON)
        } else {
            None
        }
    }

    /// Whether the source shows any marker of real column-based computation.
    pub fn has_computation_markers(&self, op_source: &str) -> bool {
        let normalized = normalize_source(op_source);
        self.computation_markers
            .iter()
            .any(|re| re.is_match(&normalized))
    }
}
