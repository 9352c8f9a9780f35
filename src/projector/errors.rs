//! Projector error types
//!
//! Error codes:
//! - ARCO_PROJECTOR_INCONSISTENT (FATAL): the record contradicts itself
//! - ARCO_PROJECTOR_SERIALIZE (FATAL): the record could not be encoded
//!
//! Both indicate a defect in the engine, never a domain outcome.

use std::fmt;

/// Severity levels for projector errors
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

/// Projector-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectorErrorCode {
    /// Record violates one of its own invariants
    ArcoProjectorInconsistent,
    /// Record could not be serialized
    ArcoProjectorSerialize,
}

impl ProjectorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ProjectorErrorCode::ArcoProjectorInconsistent => "ARCO_PROJECTOR_INCONSISTENT",
            ProjectorErrorCode::ArcoProjectorSerialize => "ARCO_PROJECTOR_SERIALIZE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for ProjectorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Projector error
#[derive(Debug, Clone)]
pub struct ProjectorError {
    code: ProjectorErrorCode,
    message: String,
}

impl ProjectorError {
    /// Record failed a consistency check
    pub fn inconsistent(check: &str) -> Self {
        Self {
            code: ProjectorErrorCode::ArcoProjectorInconsistent,
            message: format!("Determination record is inconsistent: {}", check),
        }
    }

    /// Record could not be serialized
    pub fn serialize(reason: impl fmt::Display) -> Self {
        Self {
            code: ProjectorErrorCode::ArcoProjectorSerialize,
            message: format!("Failed to serialize determination record: {}", reason),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ProjectorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Projector errors are always fatal
    pub fn is_fatal(&self) -> bool {
        self.code.severity() == Severity::Fatal
    }
}

impl fmt::Display for ProjectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for ProjectorError {}

/// Result type for projector operations
pub type ProjectorResult<T> = Result<T, ProjectorError>;
