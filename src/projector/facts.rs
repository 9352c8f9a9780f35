//! Graph-native restatement of a determination
//!
//! The output is N-Triples and loads back as ordinary input, so a later run
//! can take earlier determinations as facts (append-only audit trail).
//! Node names derive from the subject, target and record checksum, which
//! keeps them stable across identical runs.

use super::consistency;
use super::errors::ProjectorResult;
use super::record;
use crate::determination::Determination;
use crate::graph::{ntriples, Fact, Term};
use crate::vocab::{self, *};

/// Renders the determination as N-Triples.
pub fn render(d: &Determination) -> ProjectorResult<String> {
    let facts = restate(d)?;
    consistency::check_restatement(d, &facts)?;
    Ok(ntriples::write_facts(&facts))
}

/// Facts restating the determination.
pub fn restate(d: &Determination) -> ProjectorResult<Vec<Fact>> {
    let checksum = record::checksum(d)?;
    let node_iri = determination_iri(d, &checksum);
    let node = Term::named(node_iri.as_str());
    let mut facts = Facts::new();

    facts.add(&node, RDF_TYPE, Term::named(DETERMINATION));
    facts.add(&node, DETERMINATION_SUBJECT, d.subject().clone());
    facts.add(&node, TARGET_CATEGORY, d.target_category().clone());
    facts.add(&node, CLASSIFICATION_STATE, Term::string(d.state().as_str()));
    facts.add(&node, CLASSIFICATION_MODE, Term::string(d.mode().as_str()));
    facts.add(
        &node,
        CONFORMS,
        Term::literal(d.conforms().to_string(), XSD_BOOLEAN),
    );
    facts.add(&node, RECORD_CHECKSUM, Term::string(checksum.as_str()));

    if let Some(category) = d.triggering_category() {
        facts.add(&node, TRIGGERING_CATEGORY, category.clone());
    }
    if let Some(rule) = d.triggering_rule() {
        facts.add(&node, TRIGGERING_RULE, Term::string(rule));
    }

    for result in d.gate_results() {
        let gate_node = Term::named(format!("{}_{}", node_iri, result.gate_id));
        facts.add(&node, HAS_GATE_RESULT, gate_node.clone());
        facts.add(&gate_node, RDF_TYPE, Term::named(GATE_RESULT));
        facts.add(&gate_node, GATE_ID, Term::string(result.gate_id.as_str()));
        facts.add(&gate_node, GATE_OUTCOME, Term::string(result.outcome.as_str()));
    }

    for commitment in d.missing_commitments() {
        facts.add(
            &node,
            MISSING_COMMITMENT,
            Term::string(format!("{}: {}", commitment.gate_id, commitment.description)),
        );
    }

    for (index, finding) in d.constraint_violations().iter().enumerate() {
        let violation = &finding.violation;
        let violation_node = Term::named(format!("{}_violation{}", node_iri, index + 1));
        facts.add(&node, HAS_CONSTRAINT_VIOLATION, violation_node.clone());
        facts.add(&violation_node, RDF_TYPE, Term::named(CONSTRAINT_VIOLATION));
        facts.add(&violation_node, VIOLATION_INDEX, Term::integer(index as i64 + 1));
        facts.add(&violation_node, VIOLATION_SHAPE, Term::string(violation.shape.as_str()));
        facts.add(
            &violation_node,
            VIOLATION_CONSTRAINT,
            Term::string(violation.constraint.as_str()),
        );
        facts.add(&violation_node, VIOLATION_FOCUS, violation.focus.clone());
        facts.add(&violation_node, VIOLATION_MESSAGE, Term::string(violation.message.as_str()));
    }

    if let Some(path) = d.evidence_path() {
        for (index, step) in path.facts().enumerate() {
            let step_node = Term::named(format!("{}_step{}", node_iri, index + 1));
            facts.add(&node, HAS_EVIDENCE_STEP, step_node.clone());
            facts.add(&step_node, RDF_TYPE, Term::named(EVIDENCE_STEP));
            facts.add(&step_node, STEP_INDEX, Term::integer(index as i64 + 1));
            facts.add(&step_node, STEP_SUBJECT, step.subject.clone());
            facts.add(&step_node, STEP_RELATION, step.relation.clone());
            facts.add(&step_node, STEP_OBJECT, step.object.clone());
        }
    }

    Ok(facts.into_inner())
}

/// `arco:Determination_<subject>_<target>_<crc>`
fn determination_iri(d: &Determination, checksum: &str) -> String {
    let crc = checksum.trim_start_matches("crc32:");
    format!(
        "{}Determination_{}_{}_{}",
        vocab::ARCO_NS,
        sanitize(d.subject().short()),
        sanitize(d.target_category().short()),
        crc
    )
}

fn sanitize(local: &str) -> String {
    local
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

struct Facts(Vec<Fact>);

impl Facts {
    fn new() -> Self {
        Facts(Vec::new())
    }

    fn add(&mut self, subject: &Term, relation: &str, object: Term) {
        self.0
            .push(Fact::new(subject.clone(), Term::named(relation), object));
    }

    fn into_inner(self) -> Vec<Fact> {
        self.0
    }
}
