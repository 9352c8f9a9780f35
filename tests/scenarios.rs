//! End-to-end classification scenarios
//!
//! Each scenario builds a small graph in memory and runs every stage:
//! - positive: every gate satisfied and the subject documented
//! - partial: the intended-use link removed
//! - structural: the documentation link removed
//! - exclusion: an explicit exclusion from the target

mod common;

use arco::determination::{ClassificationMode, ClassificationState};
use arco::gates::{FailureKind, GateOutcome};
use arco::graph::{Fact, Graph, Term};
use arco::vocab::*;

use common::*;

// =============================================================================
// Positive
// =============================================================================

#[test]
fn test_positive_scenario_is_entailed() {
    let graph: Graph = scenario_a().into_iter().collect();
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);

    assert_eq!(d.state(), ClassificationState::Entailed);
    assert_eq!(d.mode(), ClassificationMode::Inferred);
    assert_eq!(d.triggering_rule(), Some("ARCO-R5"));
    assert_eq!(
        d.triggering_category(),
        Some(&Term::named(BIOMETRIC_IDENTIFICATION_CAPABILITY))
    );
    assert!(d.conforms());
    assert!(d.missing_commitments().is_empty());
    assert!(d.gate_results().iter().all(|r| r.outcome == GateOutcome::Pass));
}

#[test]
fn test_positive_scenario_evidence_path() {
    let graph: Graph = scenario_a().into_iter().collect();
    let (closure, d) = run(&graph, SUBJECT, ANNEX_III_1A_SYSTEM);

    let path = d.evidence_path().expect("evidence path");
    assert_eq!(path.len(), 2);
    assert_eq!(path.steps[0], Fact::named(SUBJECT, HAS_PART, COMPONENT));
    assert_eq!(path.steps[1], Fact::named(COMPONENT, HAS_DISPOSITION, DISPOSITION));
    assert_eq!(path.terminal(), &Term::named(DISPOSITION));

    // Every fact on the path is in the closure
    for fact in path.facts() {
        assert!(closure.graph().contains(fact), "{} not in closure", fact.short());
    }
}

#[test]
fn test_gate_witnesses_are_closure_facts() {
    let graph: Graph = scenario_a().into_iter().collect();
    let (closure, d) = run(&graph, SUBJECT, ANNEX_III_1A_SYSTEM);

    for result in d.gate_results() {
        let witness = result.witness.as_ref().expect("witness on PASS");
        assert_eq!(witness.get("system"), Some(&Term::named(SUBJECT)));
        for fact in &result.witness_facts {
            assert!(closure.graph().contains(fact));
        }
    }
}

// =============================================================================
// Partial: intended-use link removed
// =============================================================================

#[test]
fn test_partial_scenario_names_intended_use() {
    let graph = graph_without(scenario_a(), &intended_use_link());
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);

    assert_eq!(d.state(), ClassificationState::Underdetermined);
    assert_eq!(d.mode(), ClassificationMode::Absent);

    let outcomes: Vec<(&str, GateOutcome)> = d
        .gate_results()
        .iter()
        .map(|r| (r.gate_id.as_str(), r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("GATE-1", GateOutcome::Pass),
            ("GATE-2", GateOutcome::Fail),
            ("GATE-3", GateOutcome::Pass),
        ]
    );

    assert_eq!(d.missing_commitments().len(), 1);
    let missing = &d.missing_commitments()[0];
    assert_eq!(missing.gate_id, "GATE-2");
    assert_eq!(missing.gate_name, "intended-use");
}

#[test]
fn test_partial_scenario_names_the_broken_link() {
    // Other documents are still about the subject, so every conjunct holds
    // on its own; the join breaks at the is-about conjunct.
    let graph = graph_without(scenario_a(), &intended_use_link());
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);

    let gate2 = &d.gate_results()[1];
    assert_eq!(gate2.failure_kind, Some(FailureKind::Unlinked));
    assert!(gate2.witness.is_none());
    assert_eq!(gate2.unmet.len(), 1);
    assert_eq!(gate2.unmet[0].index, 1);
    assert!(gate2.unmet[0].commitment.contains("about the system"));
}

#[test]
fn test_missing_capability_is_missing_evidence() {
    let graph = graph_without(
        scenario_a(),
        &Fact::named(DISPOSITION, RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
    );
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);

    let gate1 = &d.gate_results()[0];
    assert_eq!(gate1.failure_kind, Some(FailureKind::MissingEvidence));
    assert_eq!(gate1.unmet.len(), 1);
    assert_eq!(gate1.unmet[0].index, 2);
    assert_eq!(d.state(), ClassificationState::Underdetermined);
}

#[test]
fn test_unlinked_evidence_is_distinguished() {
    // Intended use about the subject and a remote biometric process both
    // exist, but the specification prescribes a different process.
    let mut facts = scenario_a();
    facts.retain(|f| *f != Fact::named(INTENDED_USE, PRESCRIBES, PROCESS_NODE));
    facts.push(Fact::named(INTENDED_USE, PRESCRIBES, "urn:arco:test:other-process"));
    facts.push(Fact::named("urn:arco:test:other-process", RDF_TYPE, PROCESS));
    let graph: Graph = facts.into_iter().collect();

    let d = determine(&graph, ANNEX_III_1A_SYSTEM);
    let gate2 = &d.gate_results()[1];
    assert_eq!(gate2.outcome, GateOutcome::Fail);
    assert_eq!(gate2.failure_kind, Some(FailureKind::Unlinked));
}

// =============================================================================
// Structural: documentation link removed
// =============================================================================

#[test]
fn test_structural_scenario_is_not_entailed() {
    let graph = graph_without(scenario_a(), &Fact::named(SUBJECT, DOCUMENTED_BY, DOCUMENT));
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);

    assert!(!d.conforms());
    assert_eq!(d.constraint_violations().len(), 1);
    let finding = &d.constraint_violations()[0];
    assert_eq!(finding.violation.shape, "ARCO-S1");
    assert_eq!(finding.violation.relation, Term::named(DOCUMENTED_BY));
    assert_eq!(finding.violation.focus, Term::named(SUBJECT));
    assert!(finding.affects_subject);

    // Gates still pass; the classification holds but is not entailed
    assert!(d.gate_results().iter().all(|r| r.passed()));
    assert_eq!(d.mode(), ClassificationMode::Inferred);
    assert_eq!(d.state(), ClassificationState::Underdetermined);
}

#[test]
fn test_violation_away_from_subject_is_not_entailed() {
    // Documentation about nothing: ARCO-S2 fails on an entity that is not
    // the subject and not adjacent to it
    let mut facts = scenario_a();
    facts.push(Fact::named("urn:arco:test:orphan-doc", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
    let graph: Graph = facts.into_iter().collect();

    for target in [ANNEX_III_1A_SYSTEM, HIGH_RISK_SYSTEM] {
        let d = determine(&graph, target);
        assert_eq!(d.mode(), ClassificationMode::Inferred);
        assert!(!d.conforms());
        assert_eq!(d.subject_violations().count(), 0);
        assert_eq!(d.state(), ClassificationState::Underdetermined, "{}", target);
    }
}

#[test]
fn test_unprescribing_intended_use_is_not_entailed() {
    // A second intended-use specification that prescribes nothing: ARCO-S3
    let mut facts = scenario_a();
    facts.push(Fact::named("urn:arco:test:draft-use", RDF_TYPE, INTENDED_USE_SPECIFICATION));
    let graph: Graph = facts.into_iter().collect();

    let d = determine(&graph, ANNEX_III_1A_SYSTEM);
    assert!(d.gate_results().iter().all(|r| r.passed()));
    assert_eq!(d.constraint_violations().len(), 1);
    let finding = &d.constraint_violations()[0];
    assert_eq!(finding.violation.shape, "ARCO-S3");
    assert_eq!(finding.violation.focus, Term::named("urn:arco:test:draft-use"));
    assert!(!finding.affects_subject);
    assert_eq!(d.state(), ClassificationState::Underdetermined);
}

#[test]
fn test_same_message_violations_are_all_reported() {
    let mut facts = scenario_a();
    facts.push(Fact::named("urn:a/Doc", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
    facts.push(Fact::named("urn:b/Doc", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
    let graph: Graph = facts.into_iter().collect();
    let d = determine(&graph, ANNEX_III_1A_SYSTEM);
    assert_eq!(d.constraint_violations().len(), 2);

    let text = arco::projector::project(&d, arco::projector::ArtifactFormat::Facts).unwrap();
    let restated = arco::graph::ntriples::parse("determination.nt", &text).unwrap();
    let nodes = restated
        .iter()
        .filter(|f| f.relation.is_iri(HAS_CONSTRAINT_VIOLATION))
        .count();
    assert_eq!(nodes, 2);
}

// =============================================================================
// Exclusion
// =============================================================================

#[test]
fn test_explicit_exclusion_is_not_entailed() {
    let mut facts = scenario_a();
    facts.push(Fact::named(SUBJECT, EXCLUDED_FROM, ANNEX_III_1A_SYSTEM));
    let graph: Graph = facts.into_iter().collect();

    let d = determine(&graph, ANNEX_III_1A_SYSTEM);
    assert_eq!(d.mode(), ClassificationMode::Absent);
    assert_eq!(d.state(), ClassificationState::NotEntailed);
    assert!(d.evidence_path().is_none());

    let contradiction = d.contradiction().expect("contradiction");
    assert_eq!(contradiction.rule_id.as_deref(), Some("ARCO-R6"));
    assert_eq!(
        contradiction.fact,
        Fact::named(SUBJECT, NOT_APPLICABLE_TO, ANNEX_III_1A_SYSTEM)
    );
}

#[test]
fn test_exclusion_from_one_category_leaves_another() {
    let mut facts = scenario_a();
    facts.push(Fact::named(SUBJECT, EXCLUDED_FROM, ANNEX_III_1A_SYSTEM));
    let graph: Graph = facts.into_iter().collect();

    let d = determine(&graph, HIGH_RISK_SYSTEM);
    assert_eq!(d.state(), ClassificationState::Entailed);
    assert_eq!(d.triggering_rule(), Some("ARCO-R4"));
    assert!(d.contradiction().is_none());
}

#[test]
fn test_asserted_classification_mode() {
    let mut facts = scenario_a();
    facts.push(Fact::named(SUBJECT, RDF_TYPE, ANNEX_III_1A_SYSTEM));
    let graph: Graph = facts.into_iter().collect();

    let d = determine(&graph, ANNEX_III_1A_SYSTEM);
    assert_eq!(d.mode(), ClassificationMode::Asserted);
    assert_eq!(d.triggering_rule(), None);
    assert_eq!(d.state(), ClassificationState::Entailed);
}

// =============================================================================
// Gate independence
// =============================================================================

#[test]
fn test_gates_are_evaluated_independently() {
    let full: Graph = scenario_a().into_iter().collect();
    let baseline = determine(&full, ANNEX_III_1A_SYSTEM);

    // Breaking one gate leaves the outcome of every other gate unchanged
    let breakers = [
        Fact::named(DISPOSITION, RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
        intended_use_link(),
    ];
    for (broken, fact) in breakers.iter().enumerate() {
        let d = determine(&graph_without(scenario_a(), fact), ANNEX_III_1A_SYSTEM);
        assert_eq!(d.gate_results().len(), baseline.gate_results().len());
        for (index, result) in d.gate_results().iter().enumerate() {
            assert_eq!(result.gate_id, baseline.gate_results()[index].gate_id);
            if index == broken {
                assert_eq!(result.outcome, GateOutcome::Fail);
            } else {
                assert_eq!(result.outcome, GateOutcome::Pass, "{}", result.gate_id);
            }
        }
    }
}
