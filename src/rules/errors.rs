//! Engine error types
//!
//! Error codes:
//! - ARCO_ENGINE_DIVERGENCE (FATAL): fixpoint not reached within the cap
//! - ARCO_RULESET_INVALID (FATAL): rule set failed its static checks
//!
//! A divergence is never reported as a partial closure. The error carries
//! the last batch of newly derived facts for diagnosis.

use std::fmt;

use crate::graph::Fact;

/// Severity levels for engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Run must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Engine-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorCode {
    /// Iteration cap exceeded
    ArcoEngineDivergence,
    /// Rule set is not well-formed
    ArcoRulesetInvalid,
}

impl EngineErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            EngineErrorCode::ArcoEngineDivergence => "ARCO_ENGINE_DIVERGENCE",
            EngineErrorCode::ArcoRulesetInvalid => "ARCO_RULESET_INVALID",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for EngineErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Engine error
#[derive(Debug, Clone)]
pub struct EngineError {
    code: EngineErrorCode,
    message: String,
    /// Passes executed before giving up (divergence only)
    iterations: usize,
    /// Facts added by the final pass (divergence only)
    last_batch: Vec<Fact>,
}

impl EngineError {
    /// Fixpoint not reached after `iterations` passes
    pub fn divergence(iterations: usize, last_batch: Vec<Fact>) -> Self {
        Self {
            code: EngineErrorCode::ArcoEngineDivergence,
            message: format!(
                "Fixpoint not reached after {} passes; last pass added {} facts",
                iterations,
                last_batch.len()
            ),
            iterations,
            last_batch,
        }
    }

    /// Rule set failed a static check
    pub fn invalid_ruleset(rule_id: &str, reason: impl Into<String>) -> Self {
        Self {
            code: EngineErrorCode::ArcoRulesetInvalid,
            message: format!("Rule '{}': {}", rule_id, reason.into()),
            iterations: 0,
            last_batch: Vec::new(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> EngineErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Passes executed before divergence was declared
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Facts added by the last pass before divergence
    pub fn last_batch(&self) -> &[Fact] {
        &self.last_batch
    }

    /// Engine errors are always fatal
    pub fn is_fatal(&self) -> bool {
        self.code.severity() == Severity::Fatal
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
