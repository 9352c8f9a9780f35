//! Immutable run configuration
//!
//! Flags, an optional JSON configuration file and the selected profile are
//! resolved exactly once. Precedence, highest first: flags, file, profile.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::{ConfigError, ConfigResult};
use super::profile::{Profile, DEFAULT_DATA_DIR};
use crate::graph::{ntriples, FactSource, Term};
use crate::rules::DEFAULT_MAX_ITERATIONS;
use crate::vocab;

/// Unresolved settings, as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub profile: Option<Profile>,
    pub data_dir: Option<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub subject: Option<String>,
    pub target: Option<String>,
    pub max_iterations: Option<usize>,
    pub config_file: Option<PathBuf>,
}

/// Run-configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl ConfigFile {
    /// Reads and parses a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::invalid(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ConfigError::invalid(format!("Invalid config JSON in {}: {}", path.display(), e))
        })
    }

    /// Resolves relative paths against the directory holding the file.
    fn rebased(mut self, dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return self;
        };
        let join = |path: PathBuf| {
            if path.is_relative() {
                dir.join(path)
            } else {
                path
            }
        };
        self.data_dir = self.data_dir.map(join);
        self.sources = self.sources.into_iter().map(join).collect();
        self
    }
}

/// Validated configuration shared read-only by every stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    profile: Option<Profile>,
    sources: Vec<FactSource>,
    subject: Term,
    target: Term,
    max_iterations: usize,
}

impl RunConfig {
    /// Resolves options into a validated configuration
    pub fn resolve(options: &RunOptions) -> ConfigResult<Self> {
        let file = match &options.config_file {
            Some(path) => ConfigFile::load(path)?.rebased(path.parent()),
            None => ConfigFile::default(),
        };

        let profile = options.profile.or(file.profile);
        let data_dir = options
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let paths = if !options.sources.is_empty() {
            options.sources.clone()
        } else if !file.sources.is_empty() {
            file.sources
        } else if let Some(profile) = profile {
            profile.sources(&data_dir)
        } else {
            Vec::new()
        };

        let subject = options
            .subject
            .clone()
            .or(file.subject)
            .or_else(|| profile.map(|p| p.subject()))
            .ok_or_else(|| ConfigError::invalid("No subject: pass --subject or --profile"))?;
        let target = options
            .target
            .clone()
            .or(file.target)
            .or_else(|| profile.map(|p| p.default_target().to_string()))
            .ok_or_else(|| ConfigError::invalid("No target: pass --target or --profile"))?;
        let max_iterations = options
            .max_iterations
            .or(file.max_iterations)
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        Self::new(profile, paths, &subject, &target, max_iterations)
    }

    /// Builds and validates a configuration from explicit parts
    pub fn new(
        profile: Option<Profile>,
        paths: Vec<PathBuf>,
        subject: &str,
        target: &str,
        max_iterations: usize,
    ) -> ConfigResult<Self> {
        if paths.is_empty() {
            return Err(ConfigError::invalid(
                "No sources: pass --source or --profile",
            ));
        }
        if max_iterations == 0 {
            return Err(ConfigError::invalid("max_iterations must be > 0"));
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.is_file() {
                return Err(ConfigError::missing_source(&path));
            }
            let source =
                FactSource::from_path(path).map_err(|e| ConfigError::invalid(e.message()))?;
            sources.push(source);
        }

        Ok(Self {
            profile,
            sources,
            subject: parse_entity("subject", subject)?,
            target: parse_entity("target", target)?,
            max_iterations,
        })
    }

    pub fn profile(&self) -> Option<Profile> {
        self.profile
    }

    pub fn sources(&self) -> &[FactSource] {
        &self.sources
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn target(&self) -> &Term {
        &self.target
    }

    /// Engine pass cap
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

/// Accepts `<iri>`, an absolute IRI or a CURIE over the built-in prefixes.
///
/// The resolved IRI obeys the same rules as an IRI in an N-Triples source.
pub fn parse_entity(field: &str, text: &str) -> ConfigResult<Term> {
    let text = text.trim();
    let iri = if let Some(iri) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        iri.to_string()
    } else if text.contains("://") || text.starts_with("urn:") {
        text.to_string()
    } else {
        vocab::expand_curie(text)
            .ok_or_else(|| ConfigError::invalid(format!("Cannot resolve {} '{}'", field, text)))?
    };
    ntriples::validate_iri(&iri)
        .map_err(|e| ConfigError::invalid(format!("Invalid {} '{}': {}", field, text, e)))?;
    Ok(Term::named(iri))
}
