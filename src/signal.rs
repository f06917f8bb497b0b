//! Ctrl+C handling for interruptible scans.
//!
//! The handler sets a shared `AtomicBool`; walkers poll it between entries
//! and stop with [`ScanError::Interrupted`](crate::scanner::ScanError::Interrupted),
//! which the binary maps to exit code 130.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown without a signal.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The flag to hand to a [`ScanSession`](crate::session::ScanSession).
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler.
///
/// `ctrlc` accepts only one handler per process, so repeated calls (for
/// example from tests running `run_app` in parallel) get the existing
/// handler back with its flag cleared. If registration fails outright the
/// returned handler still works for [`ShutdownHandler::request_shutdown`].
#[must_use]
pub fn install_handler() -> ShutdownHandler {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return handler.clone();
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    let installed = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Finishing current entry...");
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    });

    if let Err(e) = installed {
        log::debug!("Ctrl+C handler not installed: {}", e);
    }

    GLOBAL_HANDLER.get_or_init(|| handler).clone()
}
