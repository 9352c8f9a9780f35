//! Closure invariant tests
//!
//! - The closure contains its input
//! - Closing a closure adds nothing
//! - Every added fact is attributed to exactly one catalog rule
//! - Blocking guards read asserted facts only
//! - Exceeding the pass cap is fatal and reports the last batch

mod common;

use arco::catalog::Catalog;
use arco::graph::{Fact, Graph};
use arco::rules::{close, EngineErrorCode, DEFAULT_MAX_ITERATIONS};
use arco::vocab::*;

use common::*;

fn closed(graph: &Graph) -> arco::rules::Closure {
    let catalog = Catalog::annex_iii().unwrap();
    close(graph, catalog.rules(), DEFAULT_MAX_ITERATIONS).unwrap()
}

#[test]
fn test_closure_contains_input() {
    let graph: Graph = scenario_a().into_iter().collect();
    let closure = closed(&graph);
    assert!(closure.graph().is_superset_of(&graph));
    assert_eq!(closure.asserted(), &graph);
}

#[test]
fn test_closure_is_idempotent() {
    let graph: Graph = scenario_a().into_iter().collect();
    let first = closed(&graph);
    let second = closed(first.graph());

    assert_eq!(second.graph(), first.graph());
    assert_eq!(second.stats().entailed, 0);
    assert_eq!(second.iterations(), 1);
}

#[test]
fn test_closure_of_empty_graph() {
    let closure = closed(&Graph::new());
    assert!(closure.graph().is_empty());
    assert_eq!(closure.iterations(), 1);
}

#[test]
fn test_every_entailed_fact_names_a_catalog_rule() {
    let catalog = Catalog::annex_iii().unwrap();
    let graph: Graph = scenario_a().into_iter().collect();
    let closure = closed(&graph);

    let stats = closure.stats();
    assert_eq!(stats.closed, stats.asserted + stats.entailed);
    assert!(stats.entailed > 0);
    for (fact, rule_id) in closure.entailed() {
        assert!(!graph.contains(fact));
        assert!(catalog.rules().get(rule_id).is_some(), "unknown rule {}", rule_id);
    }
}

#[test]
fn test_subclass_chain_is_transitive() {
    let graph: Graph = [
        Fact::named("urn:a", RDFS_SUBCLASS_OF, "urn:b"),
        Fact::named("urn:b", RDFS_SUBCLASS_OF, "urn:c"),
        Fact::named("urn:c", RDFS_SUBCLASS_OF, "urn:d"),
        Fact::named("urn:x", RDF_TYPE, "urn:a"),
    ]
    .into_iter()
    .collect();
    let closure = closed(&graph);

    let a_d = Fact::named("urn:a", RDFS_SUBCLASS_OF, "urn:d");
    assert!(closure.graph().contains(&a_d));
    assert_eq!(closure.derived_by(&a_d), Some("ARCO-R1"));

    let x_d = Fact::named("urn:x", RDF_TYPE, "urn:d");
    assert!(closure.graph().contains(&x_d));
    assert_eq!(closure.derived_by(&x_d), Some("ARCO-R2"));
}

#[test]
fn test_guard_blocks_only_on_asserted_exclusion() {
    let mut facts = scenario_a();
    facts.push(Fact::named(SUBJECT, EXCLUDED_FROM, HIGH_RISK_SYSTEM));
    let graph: Graph = facts.into_iter().collect();
    let closure = closed(&graph);

    assert!(!closure
        .graph()
        .contains(&Fact::named(SUBJECT, RDF_TYPE, HIGH_RISK_SYSTEM)));
    assert!(closure
        .graph()
        .contains(&Fact::named(SUBJECT, NOT_APPLICABLE_TO, HIGH_RISK_SYSTEM)));
    // The other classification is unaffected
    assert!(closure
        .graph()
        .contains(&Fact::named(SUBJECT, RDF_TYPE, ANNEX_III_1A_SYSTEM)));
}

#[test]
fn test_pass_cap_reports_divergence() {
    // A long has-part chain needs several passes to close
    let graph: Graph = (0..16)
        .map(|i| {
            Fact::named(
                &format!("urn:part:{}", i),
                HAS_PART,
                &format!("urn:part:{}", i + 1),
            )
        })
        .collect();
    let catalog = Catalog::annex_iii().unwrap();

    let err = close(&graph, catalog.rules(), 2).unwrap_err();
    assert_eq!(err.code(), EngineErrorCode::ArcoEngineDivergence);
    assert_eq!(err.iterations(), 2);
    assert!(!err.last_batch().is_empty());
    assert!(err.is_fatal());

    // Enough passes reach the fixpoint
    let closure = close(&graph, catalog.rules(), DEFAULT_MAX_ITERATIONS).unwrap();
    // 17 nodes in a line: 16 * 17 / 2 reachable pairs
    assert_eq!(closure.graph().len(), 136);
}
