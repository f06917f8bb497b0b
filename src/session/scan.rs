//! The scan session: base scan, compare scans, deletion.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::actions::{delete_all, DeleteConfig, DeletionReport};
use crate::duplicates::{find_duplicates, DuplicateIndex};
use crate::progress::ProgressSink;
use crate::scanner::{FileRecord, ScanError, Walker, WalkerConfig};

use super::data::{BaseScanSummary, CompareScanSummary};

/// One base index plus the most recent duplicate set.
///
/// Operations take `&mut self`, so a session runs at most one operation at
/// a time. Sessions never share an index.
#[derive(Debug, Default)]
pub struct ScanSession {
    walker_config: WalkerConfig,
    delete_config: DeleteConfig,
    index: DuplicateIndex,
    duplicates: Vec<FileRecord>,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl ScanSession {
    /// Create a session with an empty index.
    #[must_use]
    pub fn new(walker_config: WalkerConfig, delete_config: DeleteConfig) -> Self {
        Self {
            walker_config,
            delete_config,
            ..Self::default()
        }
    }

    /// Stop walks early when `flag` becomes true.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// The current base index.
    #[must_use]
    pub fn index(&self) -> &DuplicateIndex {
        &self.index
    }

    /// Duplicates from the most recent compare scan, minus any since deleted.
    #[must_use]
    pub fn duplicates(&self) -> &[FileRecord] {
        &self.duplicates
    }

    fn walker(&self, path: &Path) -> Walker {
        let walker = Walker::new(path, self.walker_config.clone());
        match &self.shutdown_flag {
            Some(flag) => walker.with_shutdown_flag(Arc::clone(flag)),
            None => walker,
        }
    }

    /// Scan `path` as the base folder.
    ///
    /// The new index replaces the old one only when the scan succeeds; a
    /// failed base scan leaves the previous generation in place.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the folder cannot be scanned at all.
    pub fn run_base_scan(
        &mut self,
        path: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<BaseScanSummary, ScanError> {
        log::info!("Base folder scan started: {}", path.display());

        let mut index = DuplicateIndex::new();
        let files = self.walker(path).scan(Some(&mut index), progress)?;

        self.index = index;
        let summary = BaseScanSummary {
            file_count: files.len(),
            indexed_keys: self.index.len(),
        };

        log::info!(
            "Base folder scan complete: {} files, {} distinct name/size keys",
            summary.file_count,
            summary.indexed_keys
        );
        Ok(summary)
    }

    /// Scan `path` as a compare folder and match it against the index.
    ///
    /// Without a prior base scan the index is empty and no duplicates are
    /// reported; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the folder cannot be scanned at all.
    pub fn run_compare_scan(
        &mut self,
        path: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<CompareScanSummary, ScanError> {
        log::info!("Compare folder scan started: {}", path.display());
        if self.index.is_empty() {
            log::debug!("Compare scan with an empty base index, no duplicates possible");
        }

        let files = self.walker(path).scan(None, progress)?;
        self.duplicates = find_duplicates(&files, &self.index);

        log::info!(
            "Compare folder scan complete: {} duplicates among {} files",
            self.duplicates.len(),
            files.len()
        );
        Ok(CompareScanSummary {
            file_count: files.len(),
            duplicates: self.duplicates.clone(),
        })
    }

    /// Delete `records`, reporting one outcome per record.
    ///
    /// Records that were deleted are dropped from the session's duplicate set.
    pub fn run_deletion(&mut self, records: &[FileRecord]) -> DeletionReport {
        log::info!("Deleting {} duplicate file(s)", records.len());

        let report = DeletionReport::from_outcomes(delete_all(records, &self.delete_config));

        let removed: HashSet<&PathBuf> = report
            .results
            .iter()
            .filter(|r| r.success)
            .map(|r| &r.path)
            .collect();
        self.duplicates.retain(|d| !removed.contains(&d.path));

        log::info!("{}", report.summary());
        report
    }
}
