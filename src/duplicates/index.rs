//! The base-folder index.
//!
//! # Overview
//!
//! A [`DuplicateIndex`] maps a [`DuplicateKey`] (file name plus size) to the
//! [`FileRecord`] it was derived from. It is filled once by a base scan and
//! only queried afterwards.
//!
//! Names are compared as raw OS strings, so two names that differ only in
//! bytes that are not valid UTF-8 stay distinct.
//!
//! When two base files share a name and size, the one scanned later wins.
//! The stored record is never used to locate the base file, so the policy
//! only matters for [`DuplicateIndex::get`].

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use crate::scanner::FileRecord;

/// Identity of a file for matching purposes.
///
/// Kept as a structured pair so no two distinct (name, size) pairs can
/// ever collapse into the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    name: OsString,
    size: u64,
}

impl DuplicateKey {
    /// Create a key from its parts.
    #[must_use]
    pub fn new(name: impl Into<OsString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The file name part of the key.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// The size part of the key.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl From<&FileRecord> for DuplicateKey {
    fn from(record: &FileRecord) -> Self {
        Self::new(record.os_name(), record.size)
    }
}

impl std::fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.name.to_string_lossy(), self.size)
    }
}

/// Index of base-folder files keyed by (name, size).
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    entries: HashMap<DuplicateKey, FileRecord>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record with the same key.
    pub fn put(&mut self, record: FileRecord) {
        let key = DuplicateKey::from(&record);
        if let Some(previous) = self.entries.insert(key, record) {
            log::trace!("Base index collision, replacing {}", previous.path.display());
        }
    }

    /// Check whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &DuplicateKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Check whether a record's key is present.
    #[must_use]
    pub fn contains_record(&self, record: &FileRecord) -> bool {
        self.contains(&DuplicateKey::from(record))
    }

    /// The record currently stored for a key (the last one inserted).
    #[must_use]
    pub fn get(&self, key: &DuplicateKey) -> Option<&FileRecord> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<FileRecord> for DuplicateIndex {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.put(record);
        }
        index
    }
}
