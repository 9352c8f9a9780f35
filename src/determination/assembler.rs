//! Determination assembler

use super::model::{
    ClassificationMode, ClassificationState, ConstraintFinding, Contradiction, Determination,
    FORMAT_VERSION,
};
use crate::catalog::Catalog;
use crate::gates::{Commitment, GateResult};
use crate::graph::{Fact, Term};
use crate::rules::Closure;
use crate::shapes::ValidationReport;
use crate::trace::EvidencePath;
use crate::vocab;

/// What is being classified, and as what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    /// Profile name, if any
    pub profile: Option<String>,
    /// Entity under evaluation
    pub subject: Term,
    /// Category it is tested against
    pub target: Term,
}

/// Frozen outputs of the evaluation stages
#[derive(Debug, Clone)]
pub struct Findings {
    pub validation: ValidationReport,
    pub gate_results: Vec<GateResult>,
    pub evidence: Option<EvidencePath>,
}

/// Combines stage outputs into the single record of a run.
pub fn assemble(
    catalog: &Catalog,
    closure: &Closure,
    request: &ClassificationRequest,
    findings: Findings,
) -> Determination {
    let graph = closure.graph();
    let subject = &request.subject;
    let target = &request.target;

    let triggering = Fact::new(subject.clone(), Term::named(vocab::RDF_TYPE), target.clone());
    let triggering_rule = closure.derived_by(&triggering).map(str::to_string);
    let mode = if !graph.contains(&triggering) {
        ClassificationMode::Absent
    } else if triggering_rule.is_some() {
        ClassificationMode::Inferred
    } else {
        ClassificationMode::Asserted
    };

    let constraint_violations: Vec<ConstraintFinding> = findings
        .validation
        .violations
        .into_iter()
        .map(|violation| {
            let affects_subject =
                &violation.focus == subject || graph.adjacent(&violation.focus, subject);
            ConstraintFinding {
                violation,
                affects_subject,
            }
        })
        .collect();

    let exclusion = Fact::new(
        subject.clone(),
        Term::named(vocab::NOT_APPLICABLE_TO),
        target.clone(),
    );
    let contradiction = graph.contains(&exclusion).then(|| Contradiction {
        rule_id: closure.derived_by(&exclusion).map(str::to_string),
        fact: exclusion,
    });

    let state = match mode {
        ClassificationMode::Inferred | ClassificationMode::Asserted => {
            if constraint_violations.is_empty() {
                ClassificationState::Entailed
            } else {
                ClassificationState::Underdetermined
            }
        }
        ClassificationMode::Absent if contradiction.is_some() => ClassificationState::NotEntailed,
        ClassificationMode::Absent => ClassificationState::Underdetermined,
    };

    let missing_commitments = findings
        .gate_results
        .iter()
        .filter_map(|result| {
            let gate = catalog.gate(&result.gate_id)?;
            Commitment::from_result(gate, result)
        })
        .collect();

    Determination {
        format_version: FORMAT_VERSION,
        profile: request.profile.clone(),
        subject: subject.clone(),
        target_category: target.clone(),
        state,
        mode,
        triggering_category: findings
            .evidence
            .as_ref()
            .map(|path| path.triggering_category.clone()),
        triggering_rule,
        gate_results: findings.gate_results,
        conforms: constraint_violations.is_empty(),
        constraint_violations,
        evidence_path: findings.evidence,
        missing_commitments,
        contradiction,
        closure: closure.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates;
    use crate::graph::Graph;
    use crate::rules::{close, DEFAULT_MAX_ITERATIONS};
    use crate::shapes;
    use crate::trace;
    use crate::vocab::*;

    fn run(graph: &Graph, subject: &str, target: &str) -> Determination {
        let catalog = Catalog::annex_iii().unwrap();
        let closure = close(graph, catalog.rules(), DEFAULT_MAX_ITERATIONS).unwrap();
        let subject = Term::named(subject);
        let target = Term::named(target);
        let findings = Findings {
            validation: shapes::validate(closure.graph(), catalog.shapes()),
            gate_results: gates::evaluate(closure.graph(), catalog.gates(), &subject),
            evidence: trace::trace(&closure, catalog.rules(), &subject, &target),
        };
        let request = ClassificationRequest {
            profile: None,
            subject,
            target,
        };
        assemble(&catalog, &closure, &request, findings)
    }

    fn high_risk_system() -> Vec<Fact> {
        vec![
            Fact::named(BIOMETRIC_IDENTIFICATION_CAPABILITY, RDFS_SUBCLASS_OF, ANNEX_III_TRIGGERING_CAPABILITY),
            Fact::named("urn:s", RDF_TYPE, SYSTEM),
            Fact::named("urn:s", HAS_PART, "urn:c"),
            Fact::named("urn:c", HAS_DISPOSITION, "urn:d"),
            Fact::named("urn:d", RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
        ]
    }

    #[test]
    fn test_inferred_with_subject_violation_is_underdetermined() {
        // No documentation: ARCO-S1 fails on the subject itself
        let graph: Graph = high_risk_system().into_iter().collect();
        let d = run(&graph, "urn:s", HIGH_RISK_SYSTEM);
        assert_eq!(d.mode(), ClassificationMode::Inferred);
        assert_eq!(d.triggering_rule(), Some("ARCO-R4"));
        assert_eq!(d.state(), ClassificationState::Underdetermined);
        assert!(!d.conforms());
        assert!(d.subject_violations().count() >= 1);
    }

    #[test]
    fn test_documented_high_risk_is_entailed() {
        let mut facts = high_risk_system();
        facts.push(Fact::named("urn:doc", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
        facts.push(Fact::named("urn:doc", IS_ABOUT, "urn:s"));
        facts.push(Fact::named("urn:s", DOCUMENTED_BY, "urn:doc"));
        let graph: Graph = facts.into_iter().collect();

        let d = run(&graph, "urn:s", HIGH_RISK_SYSTEM);
        assert_eq!(d.state(), ClassificationState::Entailed);
        assert!(d.conforms());
        assert_eq!(
            d.triggering_category(),
            Some(&Term::named(BIOMETRIC_IDENTIFICATION_CAPABILITY))
        );
        assert_eq!(d.evidence_path().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_absent_without_exclusion_is_underdetermined() {
        let graph = Graph::from_facts([Fact::named("urn:s", RDF_TYPE, SYSTEM)]);
        let d = run(&graph, "urn:s", ANNEX_III_1A_SYSTEM);
        assert_eq!(d.mode(), ClassificationMode::Absent);
        assert_eq!(d.state(), ClassificationState::Underdetermined);
        assert_eq!(d.gate_results().len(), 3);
        assert_eq!(d.missing_commitments().len(), 3);
        assert!(d.evidence_path().is_none());
        assert!(d.contradiction().is_none());
    }

    #[test]
    fn test_explicit_exclusion_is_not_entailed() {
        let mut facts = high_risk_system();
        facts.push(Fact::named("urn:s", EXCLUDED_FROM, HIGH_RISK_SYSTEM));
        let graph: Graph = facts.into_iter().collect();

        let d = run(&graph, "urn:s", HIGH_RISK_SYSTEM);
        assert_eq!(d.mode(), ClassificationMode::Absent);
        assert_eq!(d.state(), ClassificationState::NotEntailed);
        assert_eq!(
            d.contradiction().and_then(|c| c.rule_id.as_deref()),
            Some("ARCO-R6")
        );
    }

    #[test]
    fn test_violation_away_from_subject_blocks_entailment() {
        let mut facts = high_risk_system();
        facts.push(Fact::named("urn:doc", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
        facts.push(Fact::named("urn:doc", IS_ABOUT, "urn:s"));
        facts.push(Fact::named("urn:s", DOCUMENTED_BY, "urn:doc"));
        // Orphan documentation about nothing: violates ARCO-S2 elsewhere
        facts.push(Fact::named("urn:orphan", RDF_TYPE, ASSESSMENT_DOCUMENTATION));
        let graph: Graph = facts.into_iter().collect();

        let d = run(&graph, "urn:s", HIGH_RISK_SYSTEM);
        assert!(!d.conforms());
        assert_eq!(d.subject_violations().count(), 0);
        assert_eq!(d.mode(), ClassificationMode::Inferred);
        assert_eq!(d.state(), ClassificationState::Underdetermined);
    }
}
