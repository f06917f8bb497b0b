//! The client event channel.
//!
//! A client drives a [`ScanSession`](crate::session::ScanSession) by sending
//! [`ClientMessage`]s and observes it through [`ServerEvent`]s. On the wire
//! every message is a JSON object of the form
//! `{"event": "<name>", "data": {...}}`.
//!
//! | Inbound               | Outbound on success     | Outbound on failure |
//! |-----------------------|-------------------------|---------------------|
//! | `scan-base-folder`    | `base-scan-complete`    | `scan-error`        |
//! | `scan-compare-folder` | `compare-scan-complete` | `scan-error`        |
//! | `delete-duplicates`   | `delete-complete`       | `delete-error`      |
//!
//! `scan-progress` events may arrive any number of times while a scan runs.
//!
//! # Architecture
//!
//! * [`sink`]: where outbound events go (JSON lines writer, in-process channel).
//! * [`connection`]: per-client dispatch of inbound messages to a session.

pub mod connection;
pub mod sink;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::actions::DeletionReport;
use crate::progress::ScanProgress;
use crate::scanner::FileRecord;

pub use connection::{serve, Connection};
pub use sink::{EventProgress, EventSink, JsonLinesSink};

/// Messages a client sends to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Scan a folder and make it the new base index.
    ScanBaseFolder { path: PathBuf },
    /// Scan a folder and report files already present in the base index.
    ScanCompareFolder { path: PathBuf },
    /// Delete the given files.
    DeleteDuplicates { duplicates: Vec<FileRecord> },
}

impl ClientMessage {
    /// Wire name of the message.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScanBaseFolder { .. } => SCAN_BASE_FOLDER,
            Self::ScanCompareFolder { .. } => SCAN_COMPARE_FOLDER,
            Self::DeleteDuplicates { .. } => DELETE_DUPLICATES,
        }
    }
}

/// Wire name of [`ClientMessage::ScanBaseFolder`].
pub const SCAN_BASE_FOLDER: &str = "scan-base-folder";
/// Wire name of [`ClientMessage::ScanCompareFolder`].
pub const SCAN_COMPARE_FOLDER: &str = "scan-compare-folder";
/// Wire name of [`ClientMessage::DeleteDuplicates`].
pub const DELETE_DUPLICATES: &str = "delete-duplicates";

/// Events the core sends to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Scan progress, zero or more per scan.
    ScanProgress(ScanProgress),

    /// A base scan finished.
    #[serde(rename_all = "camelCase")]
    BaseScanComplete { file_count: usize, message: String },

    /// A compare scan finished.
    #[serde(rename_all = "camelCase")]
    CompareScanComplete {
        file_count: usize,
        duplicate_count: usize,
        duplicates: Vec<FileRecord>,
        message: String,
    },

    /// A deletion request finished, possibly with per-file failures.
    DeleteComplete(DeletionReport),

    /// A scan could not run.
    ScanError { message: String },

    /// A deletion request could not run.
    DeleteError { message: String },
}

impl ServerEvent {
    /// The error event to send in place of this one when it cannot be
    /// encoded, so the client still sees its request end.
    ///
    /// Progress and error events have no stand-in.
    #[must_use]
    pub fn undeliverable(&self, reason: &str) -> Option<ServerEvent> {
        match self {
            Self::BaseScanComplete { .. } | Self::CompareScanComplete { .. } => {
                Some(Self::ScanError {
                    message: format!("Error during scan: {reason}"),
                })
            }
            Self::DeleteComplete(_) => Some(Self::DeleteError {
                message: format!("Error during deletion: {reason}"),
            }),
            Self::ScanProgress(_) | Self::ScanError { .. } | Self::DeleteError { .. } => None,
        }
    }
}
