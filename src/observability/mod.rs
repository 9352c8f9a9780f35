//! Observability for determination runs
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Stage scopes
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on reasoning or artifacts
//! 3. No async or background threads
//! 4. Deterministic output (no timestamps, sorted keys)
//!
//! # Usage
//!
//! ```ignore
//! use arco::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::SourceLoaded, &[("facts", "41")]);
//!
//! let scope = ObservationScope::with_fields("LOAD", &[("sources", "3")]);
//! // ... do work ...
//! scope.complete_with_fields(&[("facts", "41")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event with fields, at the event's severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
