//! Human-readable report for the terminal.
//!
//! Colors come from `yansi`; the caller turns them off globally with
//! `yansi::disable()` for `--no-color`.

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use super::ScanReport;

/// Text output formatter.
pub struct TextOutput<'a> {
    report: &'a ScanReport<'a>,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter.
    #[must_use]
    pub fn new(report: &'a ScanReport<'a>) -> Self {
        Self { report }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let report = self.report;
        let compare = report.compare_summary;

        writeln!(
            writer,
            "{} {} ({} files)",
            "Base folder:   ".bold(),
            report.base.display(),
            report.base_summary.file_count
        )?;
        writeln!(
            writer,
            "{} {} ({} files)",
            "Compare folder:".bold(),
            report.compare.display(),
            compare.file_count
        )?;
        writeln!(writer)?;

        if compare.duplicates.is_empty() {
            writeln!(writer, "{}", "No duplicates found.".green())?;
            return Ok(());
        }

        writeln!(
            writer,
            "{} ({} files, {})",
            "Duplicates".yellow().bold(),
            compare.duplicate_count(),
            ByteSize::b(compare.duplicate_bytes())
        )?;
        let statuses = report.deletion_statuses();
        for record in &compare.duplicates {
            let marker = match statuses.get(record.path.as_path()).copied() {
                Some(true) => "deleted".green().to_string(),
                Some(false) => "kept".red().to_string(),
                None => String::new(),
            };
            writeln!(
                writer,
                "  {}  {}  {}",
                record.path.display(),
                ByteSize::b(record.size).dim(),
                marker
            )?;
        }

        if let Some(deletion) = report.deletion {
            writeln!(writer)?;
            if deletion.all_succeeded() {
                writeln!(writer, "{}", deletion.summary().green())?;
            } else {
                writeln!(writer, "{}", deletion.summary().red().bold())?;
                for failure in deletion.failures() {
                    writeln!(
                        writer,
                        "  {} {}: {}",
                        "FAILED".red(),
                        failure.path.display(),
                        failure.message
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
