//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use arco::catalog::Catalog;
use arco::determination::{assemble, ClassificationRequest, Determination, Findings};
use arco::gates;
use arco::graph::{Fact, Graph, Term};
use arco::rules::{close, Closure, DEFAULT_MAX_ITERATIONS};
use arco::shapes;
use arco::trace;
use arco::vocab::*;

pub const SUBJECT: &str = "urn:arco:test:system";
pub const COMPONENT: &str = "urn:arco:test:component";
pub const DISPOSITION: &str = "urn:arco:test:disposition";
pub const INTENDED_USE: &str = "urn:arco:test:intended-use";
pub const PROCESS_NODE: &str = "urn:arco:test:process";
pub const SCENARIO: &str = "urn:arco:test:scenario";
pub const DOCUMENT: &str = "urn:arco:test:assessment";

/// Directory holding the shipped ontology and instance files
pub fn ontology_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("ontology")
}

/// Subject with a biometric capability, every gate satisfied and documented
pub fn scenario_a() -> Vec<Fact> {
    vec![
        Fact::named(BIOMETRIC_IDENTIFICATION_CAPABILITY, RDFS_SUBCLASS_OF, ANNEX_III_TRIGGERING_CAPABILITY),
        Fact::named(REMOTE_BIOMETRIC_IDENTIFICATION_PROCESS, RDFS_SUBCLASS_OF, PROCESS),
        Fact::named(SUBJECT, RDF_TYPE, SYSTEM),
        Fact::named(SUBJECT, HAS_PART, COMPONENT),
        Fact::named(COMPONENT, HAS_DISPOSITION, DISPOSITION),
        Fact::named(DISPOSITION, RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
        Fact::named(INTENDED_USE, RDF_TYPE, INTENDED_USE_SPECIFICATION),
        Fact::named(INTENDED_USE, IS_ABOUT, SUBJECT),
        Fact::named(INTENDED_USE, PRESCRIBES, PROCESS_NODE),
        Fact::named(PROCESS_NODE, RDF_TYPE, REMOTE_BIOMETRIC_IDENTIFICATION_PROCESS),
        Fact::named(SCENARIO, RDF_TYPE, USE_SCENARIO),
        Fact::named(SCENARIO, IS_ABOUT, SUBJECT),
        Fact::named(DOCUMENT, RDF_TYPE, ASSESSMENT_DOCUMENTATION),
        Fact::named(DOCUMENT, IS_ABOUT, SUBJECT),
        Fact::named(SUBJECT, DOCUMENTED_BY, DOCUMENT),
    ]
}

/// The fact that links the intended-use specification to the subject
pub fn intended_use_link() -> Fact {
    Fact::named(INTENDED_USE, IS_ABOUT, SUBJECT)
}

pub fn graph_without(facts: Vec<Fact>, removed: &Fact) -> Graph {
    facts.into_iter().filter(|f| f != removed).collect()
}

/// Runs every stage in memory
pub fn run(graph: &Graph, subject: &str, target: &str) -> (Closure, Determination) {
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
    let determination = assemble(&catalog, &closure, &request, findings);
    (closure, determination)
}

pub fn determine(graph: &Graph, target: &str) -> Determination {
    run(graph, SUBJECT, target).1
}
