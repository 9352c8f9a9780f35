//! Artifact projection
//!
//! Every artifact is a pure function of one `Determination`. The record is
//! checked against its own invariants before any rendering, so no artifact
//! is ever written for a record that contradicts itself.

mod certificate;
mod consistency;
mod errors;
mod explanation;
mod facts;
mod record;

use clap::ValueEnum;

pub use errors::{ProjectorError, ProjectorErrorCode, ProjectorResult, Severity};
pub use facts::restate;
pub use record::checksum;

use crate::determination::Determination;

/// Artifact kinds a determination projects into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ArtifactFormat {
    /// Machine-readable JSON record
    Record,
    /// Graph-native N-Triples restatement
    Facts,
    /// Fixed-layout text certificate
    Certificate,
    /// Markdown prose
    Explanation,
}

impl ArtifactFormat {
    /// All formats, in emission order
    pub const ALL: [ArtifactFormat; 4] = [
        ArtifactFormat::Record,
        ArtifactFormat::Facts,
        ArtifactFormat::Certificate,
        ArtifactFormat::Explanation,
    ];

    /// File name the artifact is written under
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactFormat::Record => "determination.json",
            ArtifactFormat::Facts => "determination.nt",
            ArtifactFormat::Certificate => "certificate.txt",
            ArtifactFormat::Explanation => "explanation.md",
        }
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFormat::Record => "record",
            ArtifactFormat::Facts => "facts",
            ArtifactFormat::Certificate => "certificate",
            ArtifactFormat::Explanation => "explanation",
        }
    }
}

/// Renders one artifact after checking the record's consistency.
pub fn project(d: &Determination, format: ArtifactFormat) -> ProjectorResult<String> {
    consistency::check(d)?;
    match format {
        ArtifactFormat::Record => record::render(d),
        ArtifactFormat::Facts => facts::render(d),
        ArtifactFormat::Certificate => certificate::render(d),
        ArtifactFormat::Explanation => explanation::render(d),
    }
}
