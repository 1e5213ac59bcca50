//! Append-only report sinks.
//!
//! The driver writes through the [`ReportSink`] trait, so the destination is
//! injected rather than a hidden global path. [`FileReportSink`] reproduces
//! the report-file contract: append mode, never truncated, one blank-line-
//! separated run header per run, every line mirrored to stdout the moment it
//! is produced.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// Destination for report lines.
pub trait ReportSink {
    /// Begins a run: writes the run header, separated from any previous run
    /// by a blank line.
    fn header(&mut self, line: &str) -> Result<(), ReportError>;

    /// Writes one report line.
    fn line(&mut self, line: &str) -> Result<(), ReportError>;
}

/// Sink that appends to a UTF-8 text file, creating parent directories as
/// needed, and mirrors every line to stdout.
pub struct FileReportSink {
    path: PathBuf,
    file: File,
    mirror: bool,
}

impl FileReportSink {
    /// Opens the report file in append mode, creating it (and its parent
    /// directories) if absent. Existing content is never truncated.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ReportError::Open {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            path,
            file,
            mirror: true,
        })
    }

    /// Disables the stdout mirror (used by tests).
    pub fn without_mirror(mut self) -> Self {
        self.mirror = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn header(&mut self, line: &str) -> Result<(), ReportError> {
        writeln!(self.file)?;
        writeln!(self.file, "{line}")?;
        if self.mirror {
            println!("{line}");
        }
        Ok(())
    }

    fn line(&mut self, line: &str) -> Result<(), ReportError> {
        writeln!(self.file, "{line}")?;
        if self.mirror {
            println!("{line}");
        }
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ReportSink for MemorySink {
    fn header(&mut self, line: &str) -> Result<(), ReportError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn line(&mut self, line: &str) -> Result<(), ReportError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}
