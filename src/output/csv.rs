//! CSV output, one row per duplicate.
//!
//! # Columns
//!
//! - `name`: file name
//! - `size`: size in bytes
//! - `path`: full path inside the compare folder
//! - `deleted`: `true`/`false` when a deletion ran, empty otherwise

use std::io;

use serde::Serialize;
use thiserror::Error;

use super::ScanReport;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    size: u64,
    path: String,
    deleted: Option<bool>,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a ScanReport<'a>,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a ScanReport<'a>) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let statuses = self.report.deletion_statuses();

        for record in &self.report.compare_summary.duplicates {
            csv_writer.serialize(CsvRow {
                name: &record.name,
                size: record.size,
                path: record.path.to_string_lossy().into_owned(),
                deleted: statuses.get(record.path.as_path()).copied(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
