//! Observable events of a determination run
//!
//! Events are explicit and typed. The fallible stages (LOAD, CLOSURE) are
//! bracketed by scopes instead, which log `<STAGE>_BEGIN`,
//! `<STAGE>_COMPLETE` and `<STAGE>_FAILED`.

use std::fmt;

use super::logger::Severity;

/// Lifecycle events of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Run configuration resolved, stages about to start
    RunBegin,
    /// All stages completed (whatever the classification state)
    RunComplete,
    /// Run aborted by a fatal error
    RunFailed,

    // Load
    /// One input source parsed
    SourceLoaded,

    // Reasoning
    /// Iteration cap exceeded (FATAL)
    EngineDivergence,

    // Evaluation
    /// Shapes checked against the closure
    ValidationComplete,
    /// All gates evaluated
    GatesEvaluated,
    /// Evidence path reconstructed (or found absent)
    EvidenceTraced,
    /// Determination record built
    DeterminationAssembled,

    // Output
    /// One artifact written to disk
    ArtifactWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunBegin => "RUN_BEGIN",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunFailed => "RUN_FAILED",
            Event::SourceLoaded => "SOURCE_LOADED",
            Event::EngineDivergence => "ENGINE_DIVERGENCE",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::GatesEvaluated => "GATES_EVALUATED",
            Event::EvidenceTraced => "EVIDENCE_TRACED",
            Event::DeterminationAssembled => "DETERMINATION_ASSEMBLED",
            Event::ArtifactWritten => "ARTIFACT_WRITTEN",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::EngineDivergence | Event::RunFailed)
    }

    /// Severity the event is logged at. Per-item detail is TRACE.
    pub fn severity(&self) -> Severity {
        match self {
            Event::EngineDivergence | Event::RunFailed => Severity::Fatal,
            Event::SourceLoaded | Event::ArtifactWritten => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
