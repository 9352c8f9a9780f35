//! Fixed-layout human-readable certificate

use std::fmt::Write;

use super::errors::ProjectorResult;
use super::record;
use crate::determination::Determination;
use crate::graph::Term;

const WIDTH: usize = 72;
const LABEL_WIDTH: usize = 22;

/// Renders the certificate.
pub fn render(d: &Determination) -> ProjectorResult<String> {
    let checksum = record::checksum(d)?;
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);
    let mut out = String::new();

    line(&mut out, &heavy);
    line(&mut out, &center("ARCO CLASSIFICATION CERTIFICATE"));
    line(&mut out, &heavy);
    field(&mut out, "System", &d.subject().compact());
    field(&mut out, "Target category", &d.target_category().compact());
    field(&mut out, "Classification state", d.state().as_str());
    field(&mut out, "Classification mode", d.mode().as_str());
    field(
        &mut out,
        "Triggering category",
        &d.triggering_category().map_or_else(none, Term::compact),
    );
    field(
        &mut out,
        "Triggering rule",
        d.triggering_rule().unwrap_or("(none)"),
    );
    field(&mut out, "Profile", d.profile().unwrap_or("(explicit sources)"));
    field(&mut out, "Record checksum", &checksum);

    line(&mut out, &light);
    line(&mut out, "GATES");
    for result in d.gate_results() {
        line(
            &mut out,
            &format!("  {:<8} {:<14} {}", result.gate_id, result.name, result.outcome),
        );
    }

    line(&mut out, &light);
    line(&mut out, "STRUCTURAL CONSTRAINTS");
    field(&mut out, "  Conforms", if d.conforms() { "yes" } else { "no" });
    for finding in d.constraint_violations() {
        let scope = if finding.affects_subject { "subject" } else { "other" };
        line(
            &mut out,
            &format!(
                "  [{}] {} {}: {}",
                scope, finding.violation.shape, finding.violation.constraint, finding.violation.message
            ),
        );
    }

    line(&mut out, &light);
    line(&mut out, "EVIDENCE PATH");
    match d.evidence_path() {
        Some(path) => {
            for (index, step) in path.steps.iter().enumerate() {
                line(&mut out, &format!("  {}. {}", index + 1, step.short()));
            }
            line(
                &mut out,
                &format!(
                    "  => {} is a {} ({})",
                    path.terminal().short(),
                    path.triggering_category.short(),
                    path.rule_id
                ),
            );
        }
        None => line(&mut out, "  (none)"),
    }

    line(&mut out, &light);
    line(&mut out, "MISSING COMMITMENTS");
    if d.missing_commitments().is_empty() {
        line(&mut out, "  (none)");
    }
    for commitment in d.missing_commitments() {
        line(
            &mut out,
            &format!("  - {} {}: {}", commitment.gate_id, commitment.gate_name, commitment.description),
        );
        for unmet in &commitment.unmet {
            line(&mut out, &format!("      * {}", unmet));
        }
    }
    line(&mut out, &heavy);

    Ok(out)
}

fn none() -> String {
    "(none)".to_string()
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn field(out: &mut String, label: &str, value: &str) {
    let label = format!("{}:", label);
    let _ = writeln!(out, "{:<width$}{}", label, value, width = LABEL_WIDTH);
}

fn center(text: &str) -> String {
    let pad = WIDTH.saturating_sub(text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
