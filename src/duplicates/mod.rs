//! Duplicate detection module.
//!
//! This module provides:
//! - [`DuplicateIndex`]: the (name, size) index built from a base scan
//! - [`find_duplicates`]: filtering compare-scan records against that index
//!
//! Matching is by name and size only. File content is never read.

pub mod index;
pub mod matcher;

pub use index::{DuplicateIndex, DuplicateKey};
pub use matcher::find_duplicates;
