//! CLI command implementations
//!
//! Every command resolves its configuration first, so configuration errors
//! surface before any stage runs. Commands never decide anything themselves:
//! they call the pipeline and print what it returns.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::config::{Profile, RunConfig, DEFAULT_DATA_DIR};
use crate::pipeline;
use crate::projector::{self, ArtifactFormat};

use super::args::{Command, SourceArgs};
use super::errors::CliResult;
use super::io::{write_artifact, write_response, write_text};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Determine {
            source,
            out_dir,
            emit,
        } => determine(&source, out_dir.as_deref(), &emit),
        Command::ProofView { source, json } => proof_view(&source, json),
        Command::Ablate { source } => ablate(&source),
        Command::Profiles { data_dir } => profiles(data_dir.as_deref()),
    }
}

/// Classify and emit artifacts
///
/// With `out_dir`, writes each requested artifact there and prints a status
/// envelope; without it, prints the machine-readable record.
pub fn determine(source: &SourceArgs, out_dir: Option<&Path>, emit: &[ArtifactFormat]) -> CliResult<()> {
    let config = RunConfig::resolve(&source.to_options())?;
    let catalog = Catalog::annex_iii()?;
    let outcome = pipeline::determine(&config, &catalog)?;
    let d = outcome.determination();

    let out_dir = match out_dir {
        Some(dir) => dir,
        None => return write_text(&projector::project(d, ArtifactFormat::Record)?),
    };

    let formats: BTreeSet<ArtifactFormat> = if emit.is_empty() {
        ArtifactFormat::ALL.into_iter().collect()
    } else {
        emit.iter().copied().collect()
    };

    // Render every artifact before writing any of them
    let mut rendered = Vec::with_capacity(formats.len());
    for format in formats {
        rendered.push((format, projector::project(d, format)?));
    }

    fs::create_dir_all(out_dir)?;
    let mut written: Vec<PathBuf> = Vec::with_capacity(rendered.len());
    for (format, content) in &rendered {
        written.push(write_artifact(out_dir, *format, content)?);
    }

    write_response(json!({
        "subject": d.subject().as_iri(),
        "target_category": d.target_category().as_iri(),
        "state": d.state().as_str(),
        "mode": d.mode().as_str(),
        "checksum": projector::checksum(d)?,
        "artifacts": written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    }))
}

/// Print the relation-first proof view
pub fn proof_view(source: &SourceArgs, as_json: bool) -> CliResult<()> {
    let config = RunConfig::resolve(&source.to_options())?;
    let catalog = Catalog::annex_iii()?;
    let graph = pipeline::load(&config)?;
    let closure = pipeline::close(&graph, &config, &catalog)?;
    let view = pipeline::proof_view(&closure, config.subject(), config.target());

    if as_json {
        write_response(serde_json::to_value(&view)?)
    } else {
        write_text(&pipeline::render_proof_view(&view))
    }
}

/// Ablate every passing gate and print the report
pub fn ablate(source: &SourceArgs) -> CliResult<()> {
    let config = RunConfig::resolve(&source.to_options())?;
    let catalog = Catalog::annex_iii()?;
    let report = pipeline::ablate(&config, &catalog)?;
    write_response(serde_json::to_value(&report)?)
}

/// List the shipped profiles and whether their sources are present
pub fn profiles(data_dir: Option<&Path>) -> CliResult<()> {
    let data_dir = data_dir.unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR));
    write_response(Value::Array(
        Profile::ALL
            .iter()
            .map(|profile| profile_entry(*profile, data_dir))
            .collect(),
    ))
}

fn profile_entry(profile: Profile, data_dir: &Path) -> Value {
    let sources: Vec<Value> = profile
        .sources(data_dir)
        .iter()
        .map(|path| {
            json!({
                "path": path.display().to_string(),
                "present": path.is_file(),
            })
        })
        .collect();
    json!({
        "name": profile.as_str(),
        "description": profile.description(),
        "subject": profile.subject(),
        "target": profile.default_target(),
        "sources": sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_profile_sources(dir: &TempDir) {
        let schema = "<https://arco.ai/ontology/core#BiometricIdentificationCapability> \
            <http://www.w3.org/2000/01/rdf-schema#subClassOf> \
            <https://arco.ai/ontology/core#AnnexIIITriggeringCapability> .\n";
        fs::write(dir.path().join("arco_core.nt"), schema).unwrap();
        fs::write(dir.path().join("arco_governance.nt"), "").unwrap();
        fs::write(
            dir.path().join("arco_instances_claude3.json"),
            r#"{"facts": [["arco:Claude3_System", "rdf:type", "arco:System"]]}"#,
        )
        .unwrap();
    }

    fn claude3(dir: &TempDir) -> SourceArgs {
        SourceArgs {
            profile: Some(Profile::Claude3),
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_determine_writes_requested_artifacts() {
        let dir = TempDir::new().unwrap();
        write_profile_sources(&dir);
        let out = dir.path().join("out");

        determine(
            &claude3(&dir),
            Some(out.as_path()),
            &[ArtifactFormat::Certificate, ArtifactFormat::Record],
        )
        .unwrap();

        assert!(out.join("determination.json").is_file());
        assert!(out.join("certificate.txt").is_file());
        assert!(!out.join("explanation.md").exists());
    }

    #[test]
    fn test_determine_writes_all_by_default() {
        let dir = TempDir::new().unwrap();
        write_profile_sources(&dir);
        let out = dir.path().join("out");

        determine(&claude3(&dir), Some(out.as_path()), &[]).unwrap();
        for format in ArtifactFormat::ALL {
            assert!(out.join(format.file_name()).is_file());
        }
    }

    #[test]
    fn test_configuration_error_before_any_stage() {
        let dir = TempDir::new().unwrap();
        let err = determine(&claude3(&dir), None, &[]).unwrap_err();
        assert_eq!(err.code_str(), "ARCO_CONFIG_MISSING_SOURCE");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_profile_entry_reports_presence() {
        let dir = TempDir::new().unwrap();
        write_profile_sources(&dir);
        let entry = profile_entry(Profile::Claude3, dir.path());
        let present: Vec<bool> = entry["sources"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["present"].as_bool().unwrap())
            .collect();
        assert_eq!(present, vec![true, true, true]);
        assert_eq!(profile_entry(Profile::Sentinel, dir.path())["sources"][2]["present"], false);
    }
}
