//! Scan sessions.
//!
//! A [`ScanSession`] is one logical scan lifecycle. It owns the base-folder
//! [`DuplicateIndex`](crate::duplicates::DuplicateIndex) and the most recent
//! duplicate set, and runs the three operations a client can request:
//!
//! * base scan: walk a folder and replace the index with its files
//! * compare scan: walk a folder and match its files against the index
//! * deletion: remove a list of files, reporting each outcome
//!
//! Nothing is persisted; the index lives exactly as long as the session.
//!
//! # Architecture
//!
//! * [`data`]: result types returned by each operation.
//! * [`scan`]: the session itself.

pub mod data;
pub mod scan;

pub use data::{BaseScanSummary, CompareScanSummary};
pub use scan::ScanSession;
