//! CLI argument definitions using clap
//!
//! Commands:
//! - arco determine [--profile <name> | --source <file>... --subject <iri>] [--out-dir <dir>]
//! - arco proof-view [source args] [--json]
//! - arco ablate [source args]
//! - arco profiles [--data-dir <dir>]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Profile, RunOptions};
use crate::projector::ArtifactFormat;

/// ARCO - deterministic regulatory classification over an ontology graph
#[derive(Parser, Debug)]
#[command(name = "arco")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the facts come from and what is classified
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Shipped profile supplying sources, subject and target
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,

    /// Directory profile sources are resolved against [default: ./ontology]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Fact source (.nt or .json); replaces the profile's sources
    #[arg(long = "source", value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Entity under evaluation (IRI or CURIE)
    #[arg(long)]
    pub subject: Option<String>,

    /// Category to classify against (IRI or CURIE)
    #[arg(long)]
    pub target: Option<String>,

    /// Engine pass cap [default: 1000]
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// JSON run-configuration file; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Unresolved run options
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            profile: self.profile,
            data_dir: self.data_dir.clone(),
            sources: self.sources.clone(),
            subject: self.subject.clone(),
            target: self.target.clone(),
            max_iterations: self.max_iterations,
            config_file: self.config.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify the subject and emit the determination artifacts
    Determine {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory the artifacts are written to; without it the record goes to stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Artifacts to write [default: all]
        #[arg(long, value_enum, value_delimiter = ',')]
        emit: Vec<ArtifactFormat>,
    },

    /// Show the closure through its structural relations
    ProofView {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove each gate's witness facts in turn and re-run the classification
    Ablate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the shipped profiles
    Profiles {
        /// Directory profile sources are resolved against
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
