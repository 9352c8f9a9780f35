//! Internal consistency checks run before any projection
//!
//! A record that fails here was assembled wrongly. Projecting it would
//! spread the defect into every artifact, so the run aborts instead.

use std::collections::BTreeSet;

use super::errors::{ProjectorError, ProjectorResult};
use crate::determination::{ClassificationMode, ClassificationState, Determination};
use crate::graph::Fact;
use crate::vocab;

/// Checks the record against its own invariants.
pub fn check(d: &Determination) -> ProjectorResult<()> {
    check_conformance(d)?;
    check_state(d)?;
    check_commitments(d)?;
    check_evidence(d)?;
    Ok(())
}

fn check_conformance(d: &Determination) -> ProjectorResult<()> {
    if d.conforms() != d.constraint_violations().is_empty() {
        return Err(ProjectorError::inconsistent(
            "conforms disagrees with the violation list",
        ));
    }
    Ok(())
}

fn check_state(d: &Determination) -> ProjectorResult<()> {
    let present = d.mode() != ClassificationMode::Absent;
    let conforms = d.conforms();

    let consistent = match d.state() {
        ClassificationState::Entailed => present && conforms,
        ClassificationState::NotEntailed => !present && d.contradiction().is_some(),
        ClassificationState::Underdetermined => {
            (present && !conforms) || (!present && d.contradiction().is_none())
        }
    };
    if !consistent {
        return Err(ProjectorError::inconsistent(&format!(
            "state {} does not follow from mode {} and the constraint findings",
            d.state(),
            d.mode()
        )));
    }

    if d.triggering_rule().is_some() != (d.mode() == ClassificationMode::Inferred) {
        return Err(ProjectorError::inconsistent(
            "triggering rule is set exactly when the classification is inferred",
        ));
    }
    Ok(())
}

fn check_commitments(d: &Determination) -> ProjectorResult<()> {
    let failing: Vec<&str> = d
        .gate_results()
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.gate_id.as_str())
        .collect();
    let missing: Vec<&str> = d
        .missing_commitments()
        .iter()
        .map(|c| c.gate_id.as_str())
        .collect();
    if failing != missing {
        return Err(ProjectorError::inconsistent(
            "missing commitments do not match the failing gates",
        ));
    }
    Ok(())
}

fn check_evidence(d: &Determination) -> ProjectorResult<()> {
    let path = match d.evidence_path() {
        Some(path) => path,
        None if d.triggering_category().is_some() => {
            return Err(ProjectorError::inconsistent(
                "triggering category without an evidence path",
            ))
        }
        None => return Ok(()),
    };

    if d.mode() == ClassificationMode::Absent {
        return Err(ProjectorError::inconsistent(
            "evidence path for an absent classification",
        ));
    }
    if d.triggering_category() != Some(&path.triggering_category) {
        return Err(ProjectorError::inconsistent(
            "triggering category differs from the evidence path",
        ));
    }

    let mut at = d.subject();
    for step in &path.steps {
        if &step.subject != at {
            return Err(ProjectorError::inconsistent("evidence path is not contiguous"));
        }
        at = &step.object;
    }
    if path.terminal() != at {
        return Err(ProjectorError::inconsistent(
            "qualifying fact is not about the end of the evidence path",
        ));
    }
    Ok(())
}

/// Checks that a graph-native restatement keeps every entry of the record.
///
/// The restatement is written as a sorted, de-duplicated fact set, so two
/// entries that restate to the same facts would silently become one.
pub fn check_restatement(d: &Determination, facts: &[Fact]) -> ProjectorResult<()> {
    let distinct: BTreeSet<&Fact> = facts.iter().collect();
    let count = |relation: &str| distinct.iter().filter(|f| f.relation.is_iri(relation)).count();

    let expected_steps = d.evidence_path().map_or(0, |path| path.facts().count());
    let counts = [
        ("constraint violations", vocab::HAS_CONSTRAINT_VIOLATION, d.constraint_violations().len()),
        ("gate results", vocab::HAS_GATE_RESULT, d.gate_results().len()),
        ("evidence steps", vocab::HAS_EVIDENCE_STEP, expected_steps),
        ("missing commitments", vocab::MISSING_COMMITMENT, d.missing_commitments().len()),
    ];
    for (name, relation, expected) in counts {
        let restated = count(relation);
        if restated != expected {
            return Err(ProjectorError::inconsistent(&format!(
                "record has {} {} but the restatement has {}",
                expected, name, restated
            )));
        }
    }
    Ok(())
}
