//! JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "base": "/photos",
//!   "compare": "/backup",
//!   "duplicates": [
//!     { "name": "a.txt", "size": 10, "path": "/backup/a.txt" }
//!   ],
//!   "summary": {
//!     "base_files": 2,
//!     "compare_files": 2,
//!     "duplicate_count": 1,
//!     "duplicate_bytes": 10,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   },
//!   "deletion": null
//! }
//! ```
//!
//! `deletion` holds `{ total, success, failed, results }` when `--delete` ran.

use std::io::Write;

use serde::Serialize;

use super::ScanReport;
use crate::actions::DeletionReport;
use crate::error::ExitCode;
use crate::scanner::FileRecord;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files under the base folder
    pub base_files: usize,
    /// Regular files under the compare folder
    pub compare_files: usize,
    /// Compare-folder files matching a base file by name and size
    pub duplicate_count: usize,
    /// Total size of those files in bytes
    pub duplicate_bytes: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Base folder as given
    pub base: String,
    /// Compare folder as given
    pub compare: String,
    /// Duplicates in traversal order
    pub duplicates: Vec<FileRecord>,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Deletion outcomes, if a deletion ran
    pub deletion: Option<DeletionReport>,
}

impl JsonOutput {
    /// Build the JSON document for `report`.
    #[must_use]
    pub fn new(report: &ScanReport<'_>, exit_code: ExitCode) -> Self {
        let compare = report.compare_summary;
        Self {
            base: report.base.to_string_lossy().into_owned(),
            compare: report.compare.to_string_lossy().into_owned(),
            duplicates: compare.duplicates.clone(),
            summary: JsonSummary {
                base_files: report.base_summary.file_count,
                compare_files: compare.file_count,
                duplicate_count: compare.duplicate_count(),
                duplicate_bytes: compare.duplicate_bytes(),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
            deletion: report.deletion.cloned(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
