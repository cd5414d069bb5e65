//! Append-only audit log
//!
//! Every significant step of an operation is written as one line of the form
//! `<RFC3339 UTC timestamp>: <message>` to a sink supplied by the caller.
//! Writes are best-effort: a failing sink never changes an operation's result.

use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;

use chrono::SecondsFormat;

use crate::platform::Clock;

/// Audit log writing timestamped lines to a caller-owned sink
pub struct AuditLog {
    sink: Mutex<Box<dyn Write + Send>>,
    clock: Box<dyn Clock>,
}

impl AuditLog {
    pub fn new(sink: Box<dyn Write + Send>, clock: Box<dyn Clock>) -> Self {
        Self {
            sink: Mutex::new(sink),
            clock,
        }
    }

    /// Append one line. Failures are reported through tracing and otherwise ignored.
    pub fn record(&self, message: impl Display) {
        let timestamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let line = format!("{}: {}\n", timestamp, message);

        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
            tracing::warn!(error = %e, "failed to write audit log entry");
        }
    }
}
