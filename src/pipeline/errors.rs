//! Pipeline errors
//!
//! Aggregates the failures of every stage. Each variant keeps the stage's
//! own error so its stable code survives up to the command line.

use thiserror::Error;

use crate::config::ConfigError;
use crate::graph::LoadError;
use crate::projector::ProjectorError;
use crate::rules::EngineError;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A fatal failure of some stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Projector(#[from] ProjectorError),
}

impl PipelineError {
    /// Stable `ARCO_*` code of the underlying error
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Config(e) => e.code().code(),
            PipelineError::Load(e) => e.code().code(),
            PipelineError::Engine(e) => e.code().code(),
            PipelineError::Projector(e) => e.code().code(),
        }
    }

    /// Message of the underlying error, without severity and code
    pub fn message(&self) -> &str {
        match self {
            PipelineError::Config(e) => e.message(),
            PipelineError::Load(e) => e.message(),
            PipelineError::Engine(e) => e.message(),
            PipelineError::Projector(e) => e.message(),
        }
    }
}
