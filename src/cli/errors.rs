//! CLI-specific error types
//!
//! All CLI errors are FATAL. Each kind maps to a distinct process exit code;
//! a completed run exits 0 whatever its classification state.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::pipeline::PipelineError;
use crate::rules::EngineError;

/// CLI error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration could not be resolved
    ConfigError,
    /// I/O error (stdout or artifact files)
    IoError,
    /// A fact source could not be loaded
    LoadError,
    /// Divergence or a rule-set defect
    EngineError,
    /// The record contradicted itself
    ProjectorError,
}

impl CliErrorCode {
    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError | Self::IoError => 1,
            Self::LoadError => 2,
            Self::EngineError => 3,
            Self::ProjectorError => 4,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    /// Stable `ARCO_*` code printed to the user
    name: &'static str,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            name,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, "ARCO_CLI_IO_ERROR", msg)
    }

    /// Get the error kind
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.name
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        let code = match &e {
            PipelineError::Config(_) => CliErrorCode::ConfigError,
            PipelineError::Load(_) => CliErrorCode::LoadError,
            PipelineError::Engine(_) => CliErrorCode::EngineError,
            PipelineError::Projector(_) => CliErrorCode::ProjectorError,
        };
        let message = match &e {
            PipelineError::Load(load) => match (load.origin(), load.line()) {
                (Some(origin), Some(line)) => format!("{} (at {}:{})", load.message(), origin, line),
                (Some(origin), None) => format!("{} (in {})", load.message(), origin),
                _ => load.message().to_string(),
            },
            other => other.message().to_string(),
        };
        Self::new(code, e.code(), message)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        PipelineError::from(e).into()
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        PipelineError::from(e).into()
    }
}

impl From<crate::projector::ProjectorError> for CliError {
    fn from(e: crate::projector::ProjectorError) -> Self {
        PipelineError::from(e).into()
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LoadError;
    use crate::projector::ProjectorError;

    #[test]
    fn test_exit_codes() {
        let load: CliError = PipelineError::from(LoadError::unsupported_format("x.ttl")).into();
        assert_eq!(load.exit_code(), 2);
        assert_eq!(load.code_str(), "ARCO_LOAD_UNSUPPORTED_FORMAT");

        let engine: CliError = EngineError::divergence(3, Vec::new()).into();
        assert_eq!(engine.exit_code(), 3);

        let projector: CliError = ProjectorError::inconsistent("x").into();
        assert_eq!(projector.exit_code(), 4);

        let config: CliError = ConfigError::invalid("x").into();
        assert_eq!(config.exit_code(), 1);

        let io: CliError = io::Error::new(io::ErrorKind::Other, "closed").into();
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_display_is_code_and_message() {
        let err: CliError = ConfigError::invalid("No sources").into();
        assert_eq!(err.to_string(), "ARCO_CONFIG_INVALID: No sources");
    }

    #[test]
    fn test_load_location_kept() {
        let err: CliError = PipelineError::from(LoadError::unsupported_format("facts.ttl")).into();
        assert!(err.message().contains("facts.ttl"));
    }
}
