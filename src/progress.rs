//! Progress reporting for directory scans.
//!
//! The walker never talks to a terminal or a client directly. It reports
//! through the [`ProgressSink`] trait, which has three implementations in
//! this crate:
//!
//! - [`NoProgress`]: discards everything
//! - [`TerminalProgress`]: indicatif bars on stderr for the `scan` command
//! - [`crate::events::EventProgress`]: forwards `scan-progress` events to a client

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

/// The two passes of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Counting regular files to learn the percentage denominator.
    Counting,
    /// Building file records.
    Scanning,
}

impl ScanPhase {
    /// Short machine-friendly name of the phase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counting => "counting",
            Self::Scanning => "scanning",
        }
    }
}

/// A single progress notification, also the payload of `scan-progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    /// Percent complete, 0 to 100
    pub percent: u8,
    /// Human-readable label
    pub message: String,
    /// Directory or file being visited
    #[serde(serialize_with = "crate::scanner::serialize_path_lossy")]
    pub current_path: PathBuf,
    /// Files scanned so far in this traversal
    pub file_count: usize,
}

/// Compute `round(scanned / total * 100)`, clamped to 100.
///
/// An empty tree (`total == 0`) counts as complete.
#[must_use]
pub fn percent(scanned: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let scanned = scanned as u128;
    let total = total as u128;
    // Round half up, matching the usual rounding of a non-negative ratio.
    let rounded = (scanned * 200 + total) / (total * 2);
    rounded.min(100) as u8
}

/// Receiver of scan progress.
///
/// Implement this trait to observe a walk. Calls are made synchronously
/// from the walking thread, in traversal order.
pub trait ProgressSink: Send + Sync {
    /// Called when a pass starts.
    ///
    /// `total` is zero for the counting pass and the counted file total
    /// for the scanning pass.
    fn on_phase_start(&self, _phase: ScanPhase, _total: usize) {}

    /// Called when entering a directory and every N-th file.
    fn on_progress(&self, progress: &ScanProgress);

    /// Called when a pass completes.
    fn on_phase_end(&self, _phase: ScanPhase) {}
}

/// A sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: &ScanProgress) {}
}

/// Terminal progress reporter using indicatif.
///
/// Shows a spinner while counting and a bar while scanning.
pub struct TerminalProgress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl TerminalProgress {
    /// Create a new terminal reporter.
    ///
    /// When `quiet` is true nothing is drawn.
    ///
    /// ```
    /// use dupsweep::progress::TerminalProgress;
    ///
    /// let progress = TerminalProgress::new(true);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn counting_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn scanning_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressSink for TerminalProgress {
    fn on_phase_start(&self, phase: ScanPhase, total: usize) {
        if self.quiet {
            return;
        }

        let pb = match phase {
            ScanPhase::Counting => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::counting_style());
                pb.set_message("Counting files");
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
            ScanPhase::Scanning => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::scanning_style());
                pb.set_message("Scanning");
                pb
            }
        };

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_progress(&self, progress: &ScanProgress) {
        if self.quiet {
            return;
        }

        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_position(progress.file_count as u64);
                pb.set_message(truncate_path(&progress.current_path.to_string_lossy(), 40));
            }
        }
    }

    fn on_phase_end(&self, phase: ScanPhase) {
        if self.quiet {
            return;
        }

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                match phase {
                    ScanPhase::Counting => pb.finish_and_clear(),
                    ScanPhase::Scanning => pb.finish_with_message("Scan complete"),
                }
            }
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let keep = max_len.saturating_sub(3);
        let tail: String = file_name.chars().skip(name_len.saturating_sub(keep)).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
