//! Load error types
//!
//! Error codes:
//! - ARCO_LOAD_UNREADABLE (FATAL)
//! - ARCO_LOAD_MALFORMED (FATAL)
//! - ARCO_LOAD_UNSUPPORTED_FORMAT (FATAL)
//! - ARCO_LOAD_UNKNOWN_PREFIX (FATAL)
//!
//! Every load error aborts the run before any computation.

use std::fmt;

/// Severity levels for load errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Run must abort before any stage executes
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Load-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorCode {
    /// Source could not be read from disk
    ArcoLoadUnreadable,
    /// Source syntax is malformed
    ArcoLoadMalformed,
    /// Source extension names no known format
    ArcoLoadUnsupportedFormat,
    /// A prefixed name uses an undeclared prefix
    ArcoLoadUnknownPrefix,
}

impl LoadErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            LoadErrorCode::ArcoLoadUnreadable => "ARCO_LOAD_UNREADABLE",
            LoadErrorCode::ArcoLoadMalformed => "ARCO_LOAD_MALFORMED",
            LoadErrorCode::ArcoLoadUnsupportedFormat => "ARCO_LOAD_UNSUPPORTED_FORMAT",
            LoadErrorCode::ArcoLoadUnknownPrefix => "ARCO_LOAD_UNKNOWN_PREFIX",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for LoadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Load error with source location
#[derive(Debug, Clone)]
pub struct LoadError {
    code: LoadErrorCode,
    message: String,
    origin: Option<String>,
    line: Option<usize>,
}

impl LoadError {
    /// Source could not be read
    pub fn unreadable(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: LoadErrorCode::ArcoLoadUnreadable,
            message: reason.into(),
            origin: Some(origin.into()),
            line: None,
        }
    }

    /// Malformed syntax at a known line
    pub fn malformed(origin: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self {
            code: LoadErrorCode::ArcoLoadMalformed,
            message: reason.into(),
            origin: Some(origin.into()),
            line: Some(line),
        }
    }

    /// Malformed document where no line applies (e.g. JSON structure)
    pub fn malformed_document(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: LoadErrorCode::ArcoLoadMalformed,
            message: reason.into(),
            origin: Some(origin.into()),
            line: None,
        }
    }

    /// Unknown file format
    pub fn unsupported_format(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            code: LoadErrorCode::ArcoLoadUnsupportedFormat,
            message: format!("No fact format registered for '{}' (expected .nt or .json)", origin),
            origin: Some(origin),
            line: None,
        }
    }

    /// Undeclared prefix in a prefixed name
    pub fn unknown_prefix(origin: impl Into<String>, name: &str) -> Self {
        Self {
            code: LoadErrorCode::ArcoLoadUnknownPrefix,
            message: format!("Prefixed name '{}' uses an undeclared prefix", name),
            origin: Some(origin.into()),
            line: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> LoadErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source this error refers to
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns the 1-based line number if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Load errors are always fatal
    pub fn is_fatal(&self) -> bool {
        self.code.severity() == Severity::Fatal
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        match (&self.origin, self.line) {
            (Some(origin), Some(line)) => write!(f, " (at {}:{})", origin, line),
            (Some(origin), None) => write!(f, " (in {})", origin),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for LoadError {}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;
