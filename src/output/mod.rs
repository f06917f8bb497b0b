//! Renderers for the result of a `scan` run.
//!
//! - [`text`]: colored human-readable report
//! - [`json`]: machine-readable JSON for scripting
//! - [`csv`]: one row per duplicate for spreadsheets
//!
//! ```
//! use dupsweep::output::{json::JsonOutput, ScanReport};
//! use dupsweep::session::{BaseScanSummary, CompareScanSummary};
//! use dupsweep::error::ExitCode;
//! use std::path::Path;
//!
//! let base = BaseScanSummary { file_count: 2, indexed_keys: 2 };
//! let compare = CompareScanSummary { file_count: 2, duplicates: Vec::new() };
//! let report = ScanReport::new(Path::new("/base"), Path::new("/cmp"), &base, &compare);
//!
//! let json = JsonOutput::new(&report, ExitCode::NoDuplicates).to_json().unwrap();
//! assert!(json.contains("\"duplicate_count\":0"));
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::collections::HashMap;
use std::path::Path;

use crate::actions::DeletionReport;
use crate::session::{BaseScanSummary, CompareScanSummary};

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;

/// Everything a renderer needs about one `scan` run.
#[derive(Debug, Clone, Copy)]
pub struct ScanReport<'a> {
    /// Base folder as given.
    pub base: &'a Path,
    /// Compare folder as given.
    pub compare: &'a Path,
    /// Result of the base scan.
    pub base_summary: &'a BaseScanSummary,
    /// Result of the compare scan.
    pub compare_summary: &'a CompareScanSummary,
    /// Deletion outcomes, when `--delete` was given.
    pub deletion: Option<&'a DeletionReport>,
}

impl<'a> ScanReport<'a> {
    /// Report without deletion results.
    #[must_use]
    pub fn new(
        base: &'a Path,
        compare: &'a Path,
        base_summary: &'a BaseScanSummary,
        compare_summary: &'a CompareScanSummary,
    ) -> Self {
        Self {
            base,
            compare,
            base_summary,
            compare_summary,
            deletion: None,
        }
    }

    /// Attach deletion results.
    #[must_use]
    pub fn with_deletion(mut self, deletion: &'a DeletionReport) -> Self {
        self.deletion = Some(deletion);
        self
    }

    /// Deletion outcome per targeted path. Empty when no deletion ran.
    #[must_use]
    pub fn deletion_statuses(&self) -> HashMap<&'a Path, bool> {
        self.deletion
            .map(|deletion| {
                deletion
                    .results
                    .iter()
                    .map(|r| (r.path.as_path(), r.success))
                    .collect()
            })
            .unwrap_or_default()
    }
}
