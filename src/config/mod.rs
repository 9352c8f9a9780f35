//! Run configuration
//!
//! Resolved once at startup into an immutable `RunConfig`; configuration
//! errors surface before any pipeline stage runs.

mod errors;
mod profile;
mod run;

pub use errors::{ConfigError, ConfigErrorCode, ConfigResult, Severity};
pub use profile::{Profile, DEFAULT_DATA_DIR};
pub use run::{parse_entity, ConfigFile, RunConfig, RunOptions};
