//! Destinations for outbound events.

use std::io::Write;
use std::sync::mpsc::Sender;
use std::sync::Mutex;

use super::ServerEvent;
use crate::progress::{ProgressSink, ScanProgress};

/// Receiver of outbound events for one client.
///
/// Delivery is best effort: a sink that cannot deliver logs the problem and
/// drops the event, it never fails the operation that produced it.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: ServerEvent);
}

impl EventSink for Sender<ServerEvent> {
    fn emit(&self, event: ServerEvent) {
        if self.send(event).is_err() {
            log::debug!("Event receiver dropped, discarding event");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: ServerEvent) {
        (**self).emit(event);
    }
}

/// Writes each event as one line of JSON.
///
/// Output is flushed after every event so a client reading line by line
/// sees progress as it happens.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn emit(&self, event: ServerEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Failed to serialize event: {}", e);
                let Some(fallback) = event.undeliverable(&e.to_string()) else {
                    return;
                };
                match serde_json::to_string(&fallback) {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Failed to serialize fallback event: {}", e);
                        return;
                    }
                }
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            log::warn!("Event writer lock poisoned, discarding event");
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            log::warn!("Failed to write event: {}", e);
        }
    }
}

/// Forwards walker progress to a client as `scan-progress` events.
pub struct EventProgress<'a, S: EventSink + ?Sized> {
    sink: &'a S,
}

impl<'a, S: EventSink + ?Sized> EventProgress<'a, S> {
    /// Forward to `sink`.
    pub fn new(sink: &'a S) -> Self {
        Self { sink }
    }
}

impl<S: EventSink + ?Sized> ProgressSink for EventProgress<'_, S> {
    fn on_progress(&self, progress: &ScanProgress) {
        self.sink.emit(ServerEvent::ScanProgress(progress.clone()));
    }
}
