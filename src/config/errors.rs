//! Configuration error types
//!
//! Error codes:
//! - ARCO_CONFIG_INVALID (FATAL): a flag or configuration file value is unusable
//! - ARCO_CONFIG_MISSING_SOURCE (FATAL): a named source file does not exist
//!
//! Both are raised while resolving the run configuration, before any stage runs.

use std::fmt;
use std::path::Path;

/// Severity levels for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Run cannot start
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// Invalid value or incomplete configuration
    ArcoConfigInvalid,
    /// Source file not found
    ArcoConfigMissingSource,
}

impl ConfigErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigErrorCode::ArcoConfigInvalid => "ARCO_CONFIG_INVALID",
            ConfigErrorCode::ArcoConfigMissingSource => "ARCO_CONFIG_MISSING_SOURCE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Configuration error
#[derive(Debug, Clone)]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
}

impl ConfigError {
    /// Unusable configuration
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: ConfigErrorCode::ArcoConfigInvalid,
            message: message.into(),
        }
    }

    /// Source file does not exist
    pub fn missing_source(path: &Path) -> Self {
        Self {
            code: ConfigErrorCode::ArcoConfigMissingSource,
            message: format!("Source file not found: {}", path.display()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Configuration errors are always fatal
    pub fn is_fatal(&self) -> bool {
        self.code.severity() == Severity::Fatal
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;
