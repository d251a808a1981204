//! Logging port for the updater.

use std::sync::Mutex;

use tracing::Level;

/// Sink for the updater's progress messages.
pub trait UpdateLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Default logger: forwards to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl UpdateLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "locsync::updater", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "locsync::updater", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "locsync::updater", "{message}");
    }
}

/// Keeps every message in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages logged so far, oldest first.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}

impl UpdateLogger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.record(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.record(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::WARN, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_logger_keeps_order_and_levels() {
        let logger = RecordingLogger::new();
        logger.info("first");
        logger.warn("second");
        logger.debug("third");

        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], (Level::INFO, "first".to_string()));
        assert_eq!(logger.messages(Level::WARN), vec!["second".to_string()]);
    }
}
