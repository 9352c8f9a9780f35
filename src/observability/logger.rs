//! Structured JSON logger
//!
//! One line per event on stderr. Keys are ordered `event`, `severity`, then
//! the remaining fields by key. Lines carry no timestamps, so two identical
//! runs log identical lines.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Stage detail
    Trace = 0,
    /// Normal progress
    Info = 1,
    /// Suspicious but harmless
    Warn = 2,
    /// A stage failed
    Error = 3,
    /// The run aborts
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous logger writing JSON lines to stderr
pub struct Logger;

impl Logger {
    /// Logs one event. A later duplicate key overrides an earlier one.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = render(severity, event, fields);
        let mut stderr = io::stderr().lock();
        // A lost log line never fails a run
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Renders a log line, newline included.
pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let sorted: BTreeMap<&str, &str> = fields.iter().copied().collect();

    let mut line = String::with_capacity(64 + 32 * sorted.len());
    line.push_str("{\"event\":");
    push_json(&mut line, event);
    line.push_str(",\"severity\":");
    push_json(&mut line, severity.as_str());
    for (key, value) in sorted {
        line.push(',');
        push_json(&mut line, key);
        line.push(':');
        push_json(&mut line, value);
    }
    line.push_str("}\n");
    line
}

fn push_json(line: &mut String, text: &str) {
    match serde_json::to_string(text) {
        Ok(quoted) => line.push_str(&quoted),
        Err(_) => line.push_str("\"\""),
    }
}
