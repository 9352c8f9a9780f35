//! Output handling for the CLI
//!
//! - stdout: one JSON envelope, or a single artifact
//! - stderr: structured logs and the final error line
//! - UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::CliResult;
use crate::observability::{log_event_with_fields, Event};
use crate::projector::ArtifactFormat;

/// Write a success envelope to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write text to stdout as is
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Write one artifact into `dir` under its fixed file name
pub fn write_artifact(dir: &Path, format: ArtifactFormat, content: &str) -> CliResult<PathBuf> {
    let path = dir.join(format.file_name());
    fs::write(&path, content)?;

    let bytes = content.len().to_string();
    let shown = path.display().to_string();
    log_event_with_fields(
        Event::ArtifactWritten,
        &[
            ("bytes", bytes.as_str()),
            ("format", format.as_str()),
            ("path", shown.as_str()),
        ],
    );
    Ok(path)
}
