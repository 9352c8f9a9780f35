//! Relation-first proof view
//!
//! Shows the closure through its structural relations only: type and
//! subclass facts are left out, as are facts touching anonymous nodes or
//! entities outside the ARCO namespace.

use std::collections::BTreeSet;
use std::fmt::Write;

use serde::Serialize;

use crate::graph::{Fact, Term};
use crate::rules::Closure;
use crate::vocab::{self, HAS_PART, HAS_PARTICIPANT, IS_ABOUT, STRUCTURAL_RELATIONS};

/// Where a fact in the view comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    Asserted,
    Entailed,
}

impl Provenance {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Asserted => "asserted",
            Provenance::Entailed => "entailed",
        }
    }
}

/// One structural fact and its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewFact {
    pub fact: Fact,
    pub provenance: Provenance,
    /// Rule that derived it (entailed only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

/// Size of the view against the closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub asserted: usize,
    pub closed: usize,
    pub entailed: usize,
    /// Structural facts in the whole closure
    pub structural: usize,
    /// Structural facts added by rules
    pub structural_entailed: usize,
}

/// The relation-first view of one closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofView {
    pub subject: Term,
    pub target_category: Term,
    /// Whether `(subject rdf:type target)` is in the closure
    pub classified: bool,
    pub counts: ViewCounts,
    /// Structural facts that mention the subject
    pub subject_relations: Vec<ViewFact>,
    /// Structural facts one hop out from the subject's parts, documents and processes
    pub neighbourhood: Vec<ViewFact>,
}

/// Builds the view for `subject`.
pub fn proof_view(closure: &Closure, subject: &Term, target: &Term) -> ProofView {
    let structural: Vec<&Fact> = closure
        .graph()
        .iter()
        .filter(|fact| is_structural(fact))
        .collect();
    let structural_entailed = structural
        .iter()
        .filter(|fact| !closure.is_asserted(fact))
        .count();

    let subject_relations = structural
        .iter()
        .filter(|fact| &fact.subject == subject || &fact.object == subject)
        .map(|fact| view_fact(closure, fact))
        .collect();

    let anchors = anchors(closure, subject);
    let neighbourhood = structural
        .iter()
        .filter(|fact| {
            &fact.subject == subject || &fact.object == subject || anchors.contains(&fact.subject)
        })
        .map(|fact| view_fact(closure, fact))
        .collect();

    let stats = closure.stats();
    let classification = Fact::new(subject.clone(), Term::named(vocab::RDF_TYPE), target.clone());

    ProofView {
        subject: subject.clone(),
        target_category: target.clone(),
        classified: closure.graph().contains(&classification),
        counts: ViewCounts {
            asserted: stats.asserted,
            closed: stats.closed,
            entailed: stats.entailed,
            structural: structural.len(),
            structural_entailed,
        },
        subject_relations,
        neighbourhood,
    }
}

/// Plain-text rendering
pub fn render(view: &ProofView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "RELATION-FIRST PROOF VIEW: {}", view.subject.short());
    let _ = writeln!(
        out,
        "Relations: {}",
        STRUCTURAL_RELATIONS
            .iter()
            .map(|r| vocab::label(r))
            .collect::<Vec<_>>()
            .join(", ")
    );
    out.push('\n');
    let counts = &view.counts;
    let _ = writeln!(out, "Asserted facts:              {}", counts.asserted);
    let _ = writeln!(out, "Closed facts:                {}", counts.closed);
    let _ = writeln!(out, "Entailed facts:              {}", counts.entailed);
    let _ = writeln!(out, "Structural facts:            {}", counts.structural);
    let _ = writeln!(out, "Structural facts entailed:   {}", counts.structural_entailed);

    group(&mut out, "Subject relations", &view.subject_relations);
    group(&mut out, "Proof-path neighbourhood", &view.neighbourhood);

    let _ = writeln!(
        out,
        "\n{} is a {}: {}",
        view.subject.short(),
        view.target_category.short(),
        view.classified
    );
    out
}

fn group(out: &mut String, title: &str, facts: &[ViewFact]) {
    let _ = writeln!(out, "\n{}: {}", title, facts.len());
    if facts.is_empty() {
        out.push_str("  (none)\n");
    }
    for entry in facts {
        let _ = write!(out, "  - [{}] {}", entry.provenance.as_str(), entry.fact.short());
        if let Some(rule) = &entry.rule_id {
            let _ = write!(out, " ({})", rule);
        }
        out.push('\n');
    }
}

/// Structural relation between two named ARCO entities
fn is_structural(fact: &Fact) -> bool {
    let named_arco = |term: &Term| term.as_iri().is_some_and(vocab::is_arco);
    fact.relation
        .as_iri()
        .is_some_and(|r| STRUCTURAL_RELATIONS.contains(&r))
        && named_arco(&fact.subject)
        && named_arco(&fact.object)
}

/// Parts of the subject, documents about it and processes it takes part in
fn anchors(closure: &Closure, subject: &Term) -> BTreeSet<Term> {
    let graph = closure.graph();
    let mut anchors: BTreeSet<Term> = graph
        .objects(subject, &Term::named(HAS_PART))
        .into_iter()
        .cloned()
        .collect();
    anchors.extend(graph.subjects(&Term::named(IS_ABOUT), subject).into_iter().cloned());
    anchors.extend(
        graph
            .subjects(&Term::named(HAS_PARTICIPANT), subject)
            .into_iter()
            .cloned(),
    );
    anchors
}

fn view_fact(closure: &Closure, fact: &Fact) -> ViewFact {
    let rule_id = closure.derived_by(fact).map(str::to_string);
    ViewFact {
        fact: fact.clone(),
        provenance: if rule_id.is_some() {
            Provenance::Entailed
        } else {
            Provenance::Asserted
        },
        rule_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::graph::Graph;
    use crate::rules::{close, DEFAULT_MAX_ITERATIONS};
    use crate::vocab::*;

    fn a(local: &str) -> String {
        arco(local)
    }

    fn closure() -> Closure {
        let graph: Graph = [
            Fact::named(&a("S"), RDF_TYPE, SYSTEM),
            Fact::named(&a("S"), HAS_PART, &a("Camera")),
            Fact::named(&a("Camera"), HAS_PART, &a("Matcher")),
            Fact::named(&a("Matcher"), HAS_DISPOSITION, &a("MatchDisp")),
            Fact::named(&a("Doc"), IS_ABOUT, &a("S")),
            Fact::named(&a("Doc"), PRESCRIBES, &a("Proc")),
            Fact::named(&a("Other"), HAS_PART, &a("Elsewhere")),
            Fact::named(&a("S"), HAS_PART, "urn:outside"),
        ]
        .into_iter()
        .collect();
        let catalog = Catalog::annex_iii().unwrap();
        close(&graph, catalog.rules(), DEFAULT_MAX_ITERATIONS).unwrap()
    }

    #[test]
    fn test_structural_filter() {
        let closure = closure();
        let view = proof_view(&closure, &Term::named(a("S")), &Term::named(HIGH_RISK_SYSTEM));
        // 6 named structural facts plus S has_part Matcher by transitivity
        assert_eq!(view.counts.structural, 7);
        assert_eq!(view.counts.structural_entailed, 1);
        assert!(!view.classified);
    }

    #[test]
    fn test_subject_relations_mark_provenance() {
        let closure = closure();
        let view = proof_view(&closure, &Term::named(a("S")), &Term::named(HIGH_RISK_SYSTEM));
        assert_eq!(view.subject_relations.len(), 3);
        let derived = view
            .subject_relations
            .iter()
            .find(|v| v.fact.object == Term::named(a("Matcher")))
            .unwrap();
        assert_eq!(derived.provenance, Provenance::Entailed);
        assert_eq!(derived.rule_id.as_deref(), Some("ARCO-R3"));
    }

    #[test]
    fn test_neighbourhood_reaches_parts_and_documents() {
        let closure = closure();
        let view = proof_view(&closure, &Term::named(a("S")), &Term::named(HIGH_RISK_SYSTEM));
        let facts: Vec<&Fact> = view.neighbourhood.iter().map(|v| &v.fact).collect();
        assert!(facts.contains(&&Fact::named(&a("Matcher"), HAS_DISPOSITION, &a("MatchDisp"))));
        assert!(facts.contains(&&Fact::named(&a("Doc"), PRESCRIBES, &a("Proc"))));
        assert!(!facts.iter().any(|f| f.subject == Term::named(a("Other"))));
    }

    #[test]
    fn test_render_lists_groups() {
        let closure = closure();
        let view = proof_view(&closure, &Term::named(a("S")), &Term::named(HIGH_RISK_SYSTEM));
        let text = render(&view);
        assert!(text.starts_with("RELATION-FIRST PROOF VIEW: S"));
        assert!(text.contains("[entailed] S --has_part--> Matcher (ARCO-R3)"));
        assert!(text.contains("Proof-path neighbourhood:"));
    }
}
