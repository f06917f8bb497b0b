//! Results of session operations.

use serde::{Deserialize, Serialize};

use crate::scanner::FileRecord;

/// Result of a successful base scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseScanSummary {
    /// Files found under the base folder.
    pub file_count: usize,
    /// Distinct (name, size) keys now in the index.
    pub indexed_keys: usize,
}

/// Result of a successful compare scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareScanSummary {
    /// Files found under the compare folder.
    pub file_count: usize,
    /// Compare-folder files whose name and size exist in the base folder.
    pub duplicates: Vec<FileRecord>,
}

impl CompareScanSummary {
    /// Number of duplicates found.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Total size of the duplicates in bytes.
    #[must_use]
    pub fn duplicate_bytes(&self) -> u64 {
        self.duplicates.iter().map(|d| d.size).sum()
    }
}
