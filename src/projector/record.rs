//! Machine-readable record and its checksum

use crc32fast::Hasher;

use super::errors::{ProjectorError, ProjectorResult};
use crate::determination::Determination;

/// Pretty-printed JSON record, newline-terminated.
pub fn render(d: &Determination) -> ProjectorResult<String> {
    let mut out = serde_json::to_string_pretty(d).map_err(ProjectorError::serialize)?;
    out.push('\n');
    Ok(out)
}

/// `crc32:xxxxxxxx` over the compact JSON encoding of the record.
///
/// Identical records always produce identical checksums; the checksum is
/// printed in the certificate and the graph-native facts so each artifact
/// can be matched to its record.
pub fn checksum(d: &Determination) -> ProjectorResult<String> {
    let compact = serde_json::to_vec(d).map_err(ProjectorError::serialize)?;
    let mut hasher = Hasher::new();
    hasher.update(&compact);
    Ok(format!("crc32:{:08x}", hasher.finalize()))
}
