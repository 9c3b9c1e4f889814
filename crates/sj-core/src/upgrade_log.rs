//! Sink for human-readable upgrade progress.
//!
//! The journal reports what it does to its schema through an [`UpgradeLog`]
//! rather than printing. [`LogUpgradeLog`] routes messages to the `log`
//! facade, so the embedding application decides where they end up.

use std::sync::Mutex;

/// Receives progress and diagnostic messages.
pub trait UpgradeLog: Send + Sync {
    fn write_information(&self, message: &str);
    fn write_warning(&self, message: &str);
    fn write_error(&self, message: &str);
}

/// Forwards messages to the `log` crate under the `sj` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUpgradeLog;

impl UpgradeLog for LogUpgradeLog {
    fn write_information(&self, message: &str) {
        log::info!(target: "sj", "{message}");
    }

    fn write_warning(&self, message: &str) {
        log::warn!(target: "sj", "{message}");
    }

    fn write_error(&self, message: &str) {
        log::error!(target: "sj", "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUpgradeLog;

impl UpgradeLog for NoopUpgradeLog {
    fn write_information(&self, _message: &str) {}
    fn write_warning(&self, _message: &str) {}
    fn write_error(&self, _message: &str) {}
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Information,
    Warning,
    Error,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingUpgradeLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingUpgradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages, oldest first.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push((level, message.to_string()));
    }
}

impl UpgradeLog for RecordingUpgradeLog {
    fn write_information(&self, message: &str) {
        self.push(LogLevel::Information, message);
    }

    fn write_warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn write_error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
