//! ObservationScope for pipeline stage logging
//!
//! - Logs `<STAGE>_BEGIN` on creation
//! - Logs `<STAGE>_COMPLETE` or `<STAGE>_FAILED` when closed
//! - Logs `<STAGE>_INCOMPLETE` if dropped while still open

use std::cell::Cell;
use std::fmt;

use super::logger::{Logger, Severity};

/// A pipeline stage bracketed by BEGIN and COMPLETE/FAILED log lines
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::with_fields("CLOSURE", &[("asserted", "41")]);
/// match engine::close(&graph, &rules, cap) {
///     Ok(closure) => scope.complete_with_fields(&[("passes", "3")]),
///     Err(err) => scope.fail(&err),
/// }
/// ```
///
/// Fields given at creation are repeated on the closing line so each line
/// can be read on its own.
pub struct ObservationScope {
    stage: &'static str,
    closed: Cell<bool>,
    fields: Vec<(&'static str, String)>,
}

impl ObservationScope {
    /// Opens a scope whose lines all carry `fields`, logging `{stage}_BEGIN`.
    pub fn with_fields(stage: &'static str, fields: &[(&'static str, &str)]) -> Self {
        let scope = Self {
            stage,
            closed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        };
        scope.emit(Severity::Info, "BEGIN", &[]);
        scope
    }

    /// Closes the scope successfully with result fields.
    pub fn complete_with_fields(self, extra: &[(&str, &str)]) {
        self.closed.set(true);
        self.emit(Severity::Info, "COMPLETE", extra);
    }

    /// Closes the scope as failed, logging `{stage}_FAILED` at ERROR.
    ///
    /// The run-level FATAL line follows from the caller.
    pub fn fail(self, reason: &dyn fmt::Display) {
        self.closed.set(true);
        let reason = reason.to_string();
        self.emit(Severity::Error, "FAILED", &[("reason", reason.as_str())]);
    }

    fn lines<'a>(&self, suffix: &str, extra: &[(&'a str, &str)]) -> (String, Vec<(&'a str, String)>) {
        let event = format!("{}_{}", self.stage, suffix);
        let mut fields: Vec<(&str, String)> = self.fields.iter().map(|(k, v)| (*k, v.clone())).collect();
        fields.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
        (event, fields)
    }

    fn emit(&self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        let (event, fields) = self.lines(suffix, extra);
        let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Logger::log(severity, &event, &borrowed);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.closed.get() {
            self.emit(
                Severity::Warn,
                "INCOMPLETE",
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_line_repeats_opening_fields() {
        let scope = ObservationScope::with_fields("CLOSURE", &[("asserted", "12")]);
        let (event, fields) = scope.lines("COMPLETE", &[("passes", "3")]);
        assert_eq!(event, "CLOSURE_COMPLETE");
        assert_eq!(
            fields,
            vec![("asserted", "12".to_string()), ("passes", "3".to_string())]
        );
        scope.complete_with_fields(&[("passes", "3")]);
    }

    #[test]
    fn test_scope_is_closed_by_fail() {
        let scope = ObservationScope::with_fields("LOAD", &[("sources", "1")]);
        scope.fail(&"unreadable");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::with_fields("LOAD", &[]);
        assert!(!scope.closed.get());
        drop(scope);
    }
}
