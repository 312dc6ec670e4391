//! Logging sinks.
//!
//! The guard reports every failure through the narrow [`LogSink`] seam:
//! `error(message, context)`. Calls are fire-and-forget; nothing the guard
//! does depends on delivery.
//!
//! - [`TracingSink`] forwards to `tracing::error!` (the default).
//! - [`MemorySink`] records calls in memory for inspection and tests.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;
use tracing::error;

/// External logging transport.
///
/// Must be `Send + Sync`: the global handler may call it from any thread.
pub trait LogSink: Send + Sync {
    /// Record an error message under the given context tag.
    fn error(&self, message: &str, context: &str);
}

/// Sink that emits through `tracing` at ERROR level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn error(&self, message: &str, context: &str) {
        error!(context, "{message}");
    }
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Composed message.
    pub message: String,
    /// Context tag (`componentDidCatch`, `window.onerror`).
    pub context: String,
}

/// Sink that keeps every call in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Records tagged with `context`.
    pub fn with_context(&self, context: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.context == context)
            .cloned()
            .collect()
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn error(&self, message: &str, context: &str) {
        self.records.lock().push(LogRecord {
            message: message.to_string(),
            context: context.to_string(),
        });
    }
}

assert_impl_all!(TracingSink: LogSink, Send, Sync);
assert_impl_all!(MemorySink: LogSink, Send, Sync);
