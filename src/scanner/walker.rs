//! Directory walker implementation using walkdir for sequential traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which enumerates every regular
//! file below a root directory and turns it into a [`FileRecord`].
//!
//! A scan makes two passes over the tree:
//!
//! 1. **Count**: count regular files so progress can be reported as a
//!    percentage.
//! 2. **Scan**: build records depth-first, in the order the filesystem lists
//!    entries, reporting progress on every directory and every N-th file.
//!
//! # Errors
//!
//! Only the root can fail a scan (missing, not a directory, unreadable).
//! Anything that goes wrong below the root (a directory that cannot be
//! listed, a file that vanished, a symlink cycle) is logged and skipped.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::DuplicateIndex;
//! use dupsweep::progress::NoProgress;
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let mut index = DuplicateIndex::new();
//! let walker = Walker::new(Path::new("/data/base"), WalkerConfig::default());
//! let files = walker.scan(Some(&mut index), &NoProgress).unwrap();
//! println!("{} files, {} keys", files.len(), index.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::{FileRecord, ScanError, WalkerConfig};
use crate::duplicates::DuplicateIndex;
use crate::progress::{percent, ProgressSink, ScanPhase, ScanProgress};

/// Sequential directory walker.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag, checked between entries
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag becomes `true` the current pass stops at the next entry
    /// and the scan fails with [`ScanError::Interrupted`].
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn check_shutdown(&self) -> Result<(), ScanError> {
        if self
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
        {
            log::debug!("Walker: Shutdown requested, stopping at {}", self.root.display());
            return Err(ScanError::Interrupted);
        }
        Ok(())
    }

    /// Verify the root exists, is a directory, and can be listed.
    fn check_root(&self) -> Result<(), ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| self.root_error(e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }
        fs::read_dir(&self.root).map_err(|e| self.root_error(e))?;
        Ok(())
    }

    fn root_error(&self, error: std::io::Error) -> ScanError {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
            ErrorKind::PermissionDenied => ScanError::PermissionDenied(self.root.clone()),
            _ => ScanError::Io {
                path: self.root.clone(),
                source: error,
            },
        }
    }

    fn entries(&self) -> walkdir::IntoIter {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
    }

    /// Whether an entry counts as a regular file.
    ///
    /// Without `follow_symlinks` a link reports its own type, so links are
    /// never counted. Both passes use this test so the count and the scan
    /// agree on what a file is.
    fn is_regular_file(entry: &DirEntry) -> bool {
        entry.file_type().is_file()
    }

    /// Count the regular files below the root (pass 1).
    ///
    /// # Errors
    ///
    /// Fails only if the root is unusable or shutdown was requested.
    pub fn count_files(&self, progress: &dyn ProgressSink) -> Result<usize, ScanError> {
        self.check_root()?;
        progress.on_phase_start(ScanPhase::Counting, 0);

        let mut total = 0usize;
        for entry in self.entries() {
            self.check_shutdown()?;
            match entry {
                Ok(entry) if Self::is_regular_file(&entry) => total += 1,
                Ok(_) => {}
                Err(e) => log_walk_error("counting", &e),
            }
        }

        progress.on_phase_end(ScanPhase::Counting);
        log::debug!("Counted {} files under {}", total, self.root.display());
        Ok(total)
    }

    /// Walk the tree and return every readable regular file (both passes).
    ///
    /// When `index` is given (a base scan) each record is also inserted into
    /// it as it is discovered.
    ///
    /// # Errors
    ///
    /// Fails only if the root is unusable or shutdown was requested.
    pub fn scan(
        &self,
        mut index: Option<&mut DuplicateIndex>,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<FileRecord>, ScanError> {
        let total = self.count_files(progress)?;
        let interval = self.config.progress_interval.max(1);

        progress.on_phase_start(ScanPhase::Scanning, total);
        let mut files: Vec<FileRecord> = Vec::new();

        for entry in self.entries() {
            self.check_shutdown()?;

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log_walk_error("scanning", &e);
                    continue;
                }
            };

            // The root itself is neither reported nor recorded.
            if entry.depth() == 0 {
                continue;
            }

            if entry.file_type().is_dir() {
                let scanned = files.len();
                progress.on_progress(&ScanProgress {
                    percent: percent(scanned, total),
                    message: format!("Scanning folders... ({scanned}/{total})"),
                    current_path: entry.path().to_path_buf(),
                    file_count: scanned,
                });
                continue;
            }

            if !Self::is_regular_file(&entry) {
                log::trace!("Skipping non-regular entry: {}", entry.path().display());
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log_walk_error("scanning", &e);
                    continue;
                }
            };

            let record = FileRecord::new(
                entry.file_name().to_string_lossy().into_owned(),
                metadata.len(),
                entry.path(),
            );

            if let Some(index) = index.as_deref_mut() {
                index.put(record.clone());
            }
            files.push(record);

            let scanned = files.len();
            if scanned % interval == 0 {
                progress.on_progress(&ScanProgress {
                    percent: percent(scanned, total),
                    message: format!("Scanning files... ({scanned}/{total})"),
                    current_path: entry.path().to_path_buf(),
                    file_count: scanned,
                });
            }
        }

        let scanned = files.len();
        progress.on_progress(&ScanProgress {
            percent: 100,
            message: format!("Scan complete ({scanned} files)"),
            current_path: self.root.clone(),
            file_count: scanned,
        });
        progress.on_phase_end(ScanPhase::Scanning);

        if scanned != total {
            log::debug!(
                "Scanned {} of {} counted files under {} (entries changed or became unreadable)",
                scanned,
                total,
                self.root.display()
            );
        }
        log::info!("Scanned {} files under {}", scanned, self.root.display());

        Ok(files)
    }
}

/// Log a per-entry walk error. These never abort a pass.
fn log_walk_error(pass: &str, error: &walkdir::Error) {
    let path = error
        .path()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());

    if let Some(ancestor) = error.loop_ancestor() {
        log::warn!(
            "Skipping symlink cycle while {}: {} -> {}",
            pass,
            path,
            ancestor.display()
        );
        return;
    }

    match error.io_error().map(std::io::Error::kind) {
        Some(std::io::ErrorKind::NotFound) => {
            log::debug!("Entry vanished while {} (skipped): {}", pass, path);
        }
        Some(std::io::ErrorKind::PermissionDenied) => {
            log::warn!("Permission denied while {} (skipped): {}", pass, path);
        }
        _ => log::warn!("Error while {} (skipped): {}: {}", pass, path, error),
    }
}
