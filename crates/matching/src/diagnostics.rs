//! Diagnostics channel for the matcher.
//!
//! The matcher reports progress, ambiguous pairs and its final tallies
//! through a [`DiagnosticsSink`] handed in by the caller instead of a global
//! logger.

use std::sync::Mutex;

/// Receiver for human-readable matcher diagnostics.
pub trait DiagnosticsSink: Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `geospace::matching` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "geospace::matching", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "geospace::matching", "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

/// One captured diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records captured so far.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(DiagnosticLevel::Info)
    }

    fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.lock().push(DiagnosticRecord {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DiagnosticRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticsSink for RecordingSink {
    fn info(&self, message: &str) {
        self.push(DiagnosticLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(DiagnosticLevel::Warn, message);
    }
}
