//! Logging collaborator for the processors
//!
//! Processors report what they do through a `PaymentLogger` with four levels:
//! info, warning, error and success. Logging is purely observational; no
//! control flow depends on it.
//!
//! - `TracingLogger` forwards every entry to `tracing`
//! - `MemoryLogger` keeps entries in memory so tests can inspect them

use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, warn};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Success => "success",
        };
        f.write_str(name)
    }
}

/// Sink for processor diagnostics
pub trait PaymentLogger: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Logger that emits `tracing` events
///
/// Success entries are emitted at info level with `outcome = "success"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl PaymentLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn success(&self, message: &str) {
        info!(outcome = "success", "{}", message);
    }
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that records entries in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in the order they were logged
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent entry
    pub fn last(&self) -> Option<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Messages logged at `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_string(),
            });
    }
}

impl PaymentLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(LogLevel::Success, message);
    }
}
