//! Per-client dispatch of inbound messages.

use std::io::BufRead;

use super::{ClientMessage, EventProgress, EventSink, ServerEvent, DELETE_DUPLICATES};
use crate::scanner::FileRecord;
use crate::session::ScanSession;

const BASE_SCAN_COMPLETE_MESSAGE: &str = "Base folder scan complete.";
const COMPARE_SCAN_COMPLETE_MESSAGE: &str = "Compare folder scan complete.";

/// One connected client: a session plus the sink its events go to.
///
/// Every inbound message produces exactly one completion or error event,
/// preceded by any number of `scan-progress` events for scans.
pub struct Connection<S: EventSink> {
    session: ScanSession,
    sink: S,
}

impl<S: EventSink> Connection<S> {
    /// Attach `session` to `sink`.
    pub fn new(session: ScanSession, sink: S) -> Self {
        Self { session, sink }
    }

    /// The underlying session.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Close the connection, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle one decoded message.
    pub fn handle(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::ScanBaseFolder { path } => {
                let progress = EventProgress::new(&self.sink);
                match self.session.run_base_scan(&path, &progress) {
                    Ok(summary) => self.sink.emit(ServerEvent::BaseScanComplete {
                        file_count: summary.file_count,
                        message: BASE_SCAN_COMPLETE_MESSAGE.to_string(),
                    }),
                    Err(e) => {
                        log::error!("Base folder scan failed: {}", e);
                        self.emit_scan_error(&e);
                    }
                }
            }
            ClientMessage::ScanCompareFolder { path } => {
                let progress = EventProgress::new(&self.sink);
                match self.session.run_compare_scan(&path, &progress) {
                    Ok(summary) => self.sink.emit(ServerEvent::CompareScanComplete {
                        file_count: summary.file_count,
                        duplicate_count: summary.duplicate_count(),
                        duplicates: summary.duplicates,
                        message: COMPARE_SCAN_COMPLETE_MESSAGE.to_string(),
                    }),
                    Err(e) => {
                        log::error!("Compare folder scan failed: {}", e);
                        self.emit_scan_error(&e);
                    }
                }
            }
            ClientMessage::DeleteDuplicates { duplicates } => self.handle_delete(&duplicates),
        }
    }

    fn handle_delete(&mut self, duplicates: &[FileRecord]) {
        let report = self.session.run_deletion(duplicates);
        self.sink.emit(ServerEvent::DeleteComplete(report));
    }

    fn emit_scan_error(&self, error: &dyn std::fmt::Display) {
        self.sink.emit(ServerEvent::ScanError {
            message: format!("Error during scan: {error}"),
        });
    }

    fn emit_delete_error(&self, error: &dyn std::fmt::Display) {
        self.sink.emit(ServerEvent::DeleteError {
            message: format!("Error during deletion: {error}"),
        });
    }

    /// Decode and handle one JSON message.
    ///
    /// A message that cannot be decoded is answered with `delete-error` if it
    /// names the `delete-duplicates` event and with `scan-error` otherwise.
    pub fn handle_json(&mut self, text: &str) {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Discarding malformed message: {}", e);
                self.emit_scan_error(&format_args!("invalid message: {e}"));
                return;
            }
        };

        let event_name = value
            .get("event")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        match serde_json::from_value::<ClientMessage>(value) {
            Ok(message) => {
                log::debug!("Received {}", message.name());
                self.handle(message);
            }
            Err(e) => {
                log::warn!("Rejected '{}' message: {}", event_name, e);
                if event_name == DELETE_DUPLICATES {
                    self.emit_delete_error(&format_args!("invalid request: {e}"));
                } else {
                    self.emit_scan_error(&format_args!("invalid request: {e}"));
                }
            }
        }
    }
}

/// Run one connection over a line-oriented reader until end of input.
///
/// Each non-blank line is one JSON message.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub fn serve<R: BufRead, S: EventSink>(
    reader: R,
    connection: &mut Connection<S>,
) -> std::io::Result<()> {
    log::info!("Client connected");

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        connection.handle_json(line);
    }

    log::info!("Client disconnected");
    Ok(())
}
