//! Prose explanation (Markdown)

use std::fmt::Write;

use super::errors::ProjectorResult;
use super::record;
use crate::determination::{ClassificationMode, ClassificationState, Determination};

/// Renders the explanation.
pub fn render(d: &Determination) -> ProjectorResult<String> {
    let checksum = record::checksum(d)?;
    let mut out = String::new();
    let subject = d.subject().short();
    let target = d.target_category().short();

    let _ = writeln!(out, "# Classification of {}\n", subject);
    let _ = writeln!(out, "**{}** against `{}`.\n", d.state(), d.target_category().compact());
    out.push_str(&summary(d));
    out.push_str("\n\n");

    out.push_str("## Gates\n\n");
    out.push_str("| Gate | Name | Outcome | Detail |\n");
    out.push_str("|------|------|---------|--------|\n");
    for result in d.gate_results() {
        let detail = if result.passed() {
            result
                .witness_facts
                .iter()
                .map(|f| f.short())
                .collect::<Vec<_>>()
                .join("; ")
        } else {
            result
                .unmet
                .iter()
                .map(|u| u.pattern.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            result.gate_id, result.name, result.outcome, detail
        );
    }
    out.push('\n');

    out.push_str("## Structural constraints\n\n");
    if d.constraint_violations().is_empty() {
        out.push_str("The closed graph conforms to every shape.\n");
    } else {
        for finding in d.constraint_violations() {
            let marker = if finding.affects_subject { " (bears on the subject)" } else { "" };
            let _ = writeln!(
                out,
                "- {} / {}: {}{}",
                finding.violation.shape, finding.violation.constraint, finding.violation.message, marker
            );
        }
    }
    out.push('\n');

    out.push_str("## Evidence path\n\n");
    match d.evidence_path() {
        Some(path) => {
            let _ = writeln!(
                out,
                "Following {} from {} to a {}:\n",
                path.rule_id,
                subject,
                path.triggering_category.short()
            );
            for (index, fact) in path.facts().enumerate() {
                let _ = writeln!(out, "{}. {}", index + 1, fact.short());
            }
        }
        None => {
            let _ = writeln!(out, "No evidence path links {} to {}.", subject, target);
        }
    }
    out.push('\n');

    out.push_str("## Missing commitments\n\n");
    if d.missing_commitments().is_empty() {
        out.push_str("None.\n");
    }
    for commitment in d.missing_commitments() {
        let _ = writeln!(
            out,
            "- **{} {}**: {}",
            commitment.gate_id, commitment.gate_name, commitment.description
        );
        for unmet in &commitment.unmet {
            let _ = writeln!(out, "  - {}", unmet);
        }
    }
    out.push('\n');

    let stats = d.closure_stats();
    out.push_str("## Closure\n\n");
    let _ = writeln!(
        out,
        "{} asserted facts closed to {} ({} entailed) in {} passes.\n",
        stats.asserted, stats.closed, stats.entailed, stats.passes
    );
    let _ = writeln!(out, "Record checksum: `{}`", checksum);

    Ok(out)
}

fn summary(d: &Determination) -> String {
    let subject = d.subject().short();
    let target = d.target_category().short();
    match (d.state(), d.mode()) {
        (ClassificationState::Entailed, ClassificationMode::Inferred) => format!(
            "{} is a {}: rule {} derived the classification and the graph meets every structural constraint.",
            subject,
            target,
            d.triggering_rule().unwrap_or("?")
        ),
        (ClassificationState::Entailed, _) => format!(
            "{} is asserted to be a {} and the graph meets every structural constraint.",
            subject, target
        ),
        (ClassificationState::NotEntailed, _) => format!(
            "{} is explicitly excluded from {}; the classification does not hold.",
            subject, target
        ),
        (ClassificationState::Underdetermined, ClassificationMode::Absent) => format!(
            "The facts neither establish nor exclude {} as a {}.",
            subject, target
        ),
        (ClassificationState::Underdetermined, _) => format!(
            "{} classifies as a {}, but the graph leaves {} structural constraint(s) unmet ({} bearing on {}).",
            subject,
            target,
            d.constraint_violations().len(),
            d.subject_violations().count(),
            subject
        ),
    }
}
