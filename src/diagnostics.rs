//! Diagnostic sink for check results.
//!
//! The checker reports through an explicit sink capability instead of a
//! process-global logger, so callers decide where diagnostics go and
//! test suites can capture them without side effects.

use std::fmt;
use std::sync::Mutex;

use chrono::Local;
use colored::Colorize;

/// Component name used in console diagnostic lines.
const COMPONENT: &str = "packcheck";

/// Diagnostic severity.
///
/// `Debug` carries file-exists confirmations and per-document scan
/// progress; `Error` marks unresolved or malformed references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        };
        write!(f, "{label}")
    }
}

/// Append-only target for diagnostics.
///
/// Implementations must be safe to call through `&self`; writes are
/// serialized internally where the backing store needs it.
pub trait DiagnosticSink {
    fn emit(&self, severity: Severity, message: &str);
}

/// Sink that writes one timestamped line per diagnostic to stderr.
///
/// Format: `<timestamp> - packcheck - <SEVERITY> - <message>`.
/// Debug diagnostics are suppressed unless `debug` is set.
pub struct ConsoleSink {
    debug: bool,
}

impl ConsoleSink {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, severity: Severity, message: &str) {
        if severity == Severity::Debug && !self.debug {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = match severity {
            Severity::Debug => "DEBUG".dimmed(),
            Severity::Info => "INFO".blue(),
            Severity::Error => "ERROR".red(),
        };
        eprintln!("{timestamp} - {COMPONENT} - {level} - {message}");
    }
}

/// Sink that collects diagnostics in memory.
///
/// Used by the test suites to assert on checker output, and usable
/// wherever a caller wants the collected list instead of a stream.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages emitted at the given severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == Severity::Error)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
