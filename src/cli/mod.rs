//! CLI module for ARCO
//!
//! Provides command-line interface for:
//! - determine: Classify a subject and emit its artifacts
//! - proof-view: Relation-first view of the closure
//! - ablate: Gate witness ablation
//! - profiles: List the shipped profiles

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SourceArgs};
pub use commands::{ablate, determine, profiles, proof_view, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_artifact, write_response, write_text};
