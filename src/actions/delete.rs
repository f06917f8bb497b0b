//! Bulk deletion of duplicate files.
//!
//! # Overview
//!
//! This module deletes a batch of [`FileRecord`]s and reports one
//! [`DeletionOutcome`] per input, in input order. A failure on one file is
//! recorded and the batch moves on; nothing is rolled back.
//!
//! Two deletion modes are supported:
//! - Permanent deletion (default), which unlinks the file
//! - Move to system trash (`use_trash`), which is recoverable
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::delete::{delete_all, DeleteConfig, DeletionReport};
//! use dupsweep::scanner::FileRecord;
//!
//! let records = vec![FileRecord::new("a.txt", 10, "/compare/a.txt")];
//! let report = DeletionReport::from_outcomes(delete_all(&records, &DeleteConfig::default()));
//! println!("{} deleted, {} failed", report.success, report.failed);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scanner::FileRecord;

/// Confirmation text for a successful permanent deletion.
pub const DELETED_MESSAGE: &str = "Deleted";

/// Confirmation text for a successful move to trash.
pub const TRASHED_MESSAGE: &str = "Moved to trash";

/// Error type for deletion of a single file.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path names a directory, which is never deleted.
    #[error("is a directory: {0}")]
    IsDirectory(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("delete failed for {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::IsDirectory(p)
            | Self::TrashFailed { path: p, .. }
            | Self::RemoveFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Move files to the system trash instead of unlinking them.
    pub use_trash: bool,
}

impl DeleteConfig {
    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self { use_trash: false }
    }

    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self { use_trash: true }
    }
}

/// Result of attempting to delete one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    /// Path that was targeted.
    #[serde(serialize_with = "crate::scanner::serialize_path_lossy")]
    pub path: PathBuf,
    /// Whether the file is gone.
    pub success: bool,
    /// Confirmation on success, the error text on failure.
    pub message: String,
}

impl DeletionOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn succeeded(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            success: true,
            message: message.into(),
        }
    }

    /// Failed outcome.
    #[must_use]
    pub fn failed(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            success: false,
            message: message.into(),
        }
    }
}

/// Aggregate of a deletion batch, also the payload of `delete-complete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    /// Number of files the batch was asked to delete.
    pub total: usize,
    /// Number of files deleted.
    pub success: usize,
    /// Number of files that could not be deleted.
    pub failed: usize,
    /// One outcome per requested file, in request order.
    pub results: Vec<DeletionOutcome>,
}

impl DeletionReport {
    /// Tally a list of outcomes.
    #[must_use]
    pub fn from_outcomes(results: Vec<DeletionOutcome>) -> Self {
        let success = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            success,
            failed: results.len() - success,
            results,
        }
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Outcomes that failed, for follow-up by the user.
    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} of {} file(s)", self.success, self.total)
        } else {
            format!(
                "Deleted {} of {} file(s), {} failed",
                self.success, self.total, self.failed
            )
        }
    }
}

/// Refuse directories and report missing files before touching anything.
fn check_target(path: &Path) -> Result<(), DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(DeleteError::IsDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Move a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `IsDirectory` if the path is a directory
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<(), DeleteError> {
    check_target(path)?;

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {}", path.display());
    Ok(())
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if the file's metadata cannot be read
/// - `IsDirectory` if the path is a directory
/// - `RemoveFailed` if the unlink itself fails
pub fn permanent_delete(path: &Path) -> Result<(), DeleteError> {
    check_target(path)?;

    fs::remove_file(path).map_err(|e| {
        log::error!("Delete failed for {}: {}", path.display(), e);
        DeleteError::RemoveFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    log::info!("Deleted: {}", path.display());
    Ok(())
}

/// Delete one file according to `config`, as an outcome.
#[must_use]
pub fn delete_one(record: &FileRecord, config: &DeleteConfig) -> DeletionOutcome {
    let (result, confirmation) = if config.use_trash {
        (delete_to_trash(&record.path), TRASHED_MESSAGE)
    } else {
        (permanent_delete(&record.path), DELETED_MESSAGE)
    };

    match result {
        Ok(()) => DeletionOutcome::succeeded(record.path.clone(), confirmation),
        Err(e) => {
            log::warn!("Failed to delete {}: {}", record.path.display(), e);
            DeletionOutcome::failed(record.path.clone(), e.to_string())
        }
    }
}

/// Delete every record, continuing past failures.
///
/// Returns exactly one outcome per input record, in input order.
#[must_use]
pub fn delete_all(records: &[FileRecord], config: &DeleteConfig) -> Vec<DeletionOutcome> {
    let outcomes: Vec<DeletionOutcome> = records.iter().map(|r| delete_one(r, config)).collect();

    let failed = outcomes.iter().filter(|o| !o.success).count();
    log::info!(
        "Deletion batch finished: {} succeeded, {} failed",
        outcomes.len() - failed,
        failed
    );

    outcomes
}
