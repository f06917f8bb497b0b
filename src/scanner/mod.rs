//! Scanner module for directory traversal.
//!
//! This module provides:
//! - Sequential, depth-first directory walking using walkdir
//! - [`FileRecord`], the unit every later stage works with
//! - Progress accounting for the two-pass (count, then scan) traversal
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::progress::NoProgress;
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let files = walker.scan(None, &NoProgress).expect("scan failed");
//! for file in &files {
//!     println!("{} ({} bytes)", file.path.display(), file.size);
//! }
//! ```

pub mod walker;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

pub use walker::Walker;

/// Default number of files between two progress events.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// A regular file discovered during a scan.
///
/// Identity for duplicate matching is the `(name, size)` pair, where the
/// name is the raw final component of `path`. `name` is its display form
/// and may be lossy for names that are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base name of the file (not path-qualified)
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Full path to the file
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// The file name exactly as the filesystem reports it.
    ///
    /// Falls back to `name` when `path` has no final component.
    #[must_use]
    pub fn os_name(&self) -> &OsStr {
        self.path
            .file_name()
            .unwrap_or_else(|| OsStr::new(&self.name))
    }
}

/// Serialize a path as a string, replacing invalid UTF-8 with U+FFFD.
///
/// serde's own `Path` impl fails on such paths, which would sink the whole
/// payload carrying them.
pub(crate) fn serialize_path_lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Cycles are detected and skipped as per-entry errors.
    pub follow_symlinks: bool,

    /// Emit a progress event every this many files.
    pub progress_interval: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// A `progress_interval` of zero is raised to one.
    #[must_use]
    pub fn new(follow_symlinks: bool, progress_interval: usize) -> Self {
        Self {
            follow_symlinks,
            progress_interval: progress_interval.max(1),
        }
    }
}

/// Errors that fail a whole scan.
///
/// Problems with individual entries below the root are logged and skipped,
/// they never surface as a `ScanError`.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing the scan root.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The scan root was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The scan was stopped by a shutdown request.
    #[error("Scan interrupted")]
    Interrupted,

    /// An I/O error occurred while accessing the scan root.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
