//! Fixpoint rule engine
//!
//! Naive forward chaining: each pass evaluates every rule, in rule-set order,
//! against the graph as it stood at the start of the pass, and collects the
//! consequents that are not yet present. The batch is added at the end of
//! the pass. A pass that adds nothing ends the computation.
//!
//! # Guarantees
//!
//! - Monotone: the closure contains every asserted fact
//! - Idempotent: closing a closure adds nothing
//! - Attributable: every derived fact records the one rule that first
//!   produced it (lowest pass, then rule order)
//! - Bounded: exceeding `max_iterations` passes is a fatal divergence

use std::collections::BTreeMap;

use serde::Serialize;

use super::errors::{EngineError, EngineResult};
use super::rule::{Rule, RuleSet};
use crate::graph::{any_match, match_all, Bindings, Fact, Graph};

/// Default pass cap
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Deductive closure of an asserted graph
#[derive(Debug, Clone)]
pub struct Closure {
    asserted: Graph,
    graph: Graph,
    derivations: BTreeMap<Fact, String>,
    iterations: usize,
}

/// Size summary of a closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClosureStats {
    /// Facts in the input graph
    pub asserted: usize,
    /// Facts in the closed graph
    pub closed: usize,
    /// Facts added by rules
    pub entailed: usize,
    /// Passes run, including the final empty pass
    pub passes: usize,
}

impl Closure {
    /// The closed graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The input graph the closure was computed from
    pub fn asserted(&self) -> &Graph {
        &self.asserted
    }

    /// Id of the rule that derived `fact`, if it was derived rather than asserted
    pub fn derived_by(&self, fact: &Fact) -> Option<&str> {
        self.derivations.get(fact).map(String::as_str)
    }

    /// Returns true if `fact` was part of the input
    pub fn is_asserted(&self, fact: &Fact) -> bool {
        self.asserted.contains(fact)
    }

    /// Derived facts with their rule ids, in canonical order
    pub fn entailed(&self) -> impl Iterator<Item = (&Fact, &str)> {
        self.derivations.iter().map(|(f, r)| (f, r.as_str()))
    }

    /// Passes run, including the final empty pass
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Size summary
    pub fn stats(&self) -> ClosureStats {
        ClosureStats {
            asserted: self.asserted.len(),
            closed: self.graph.len(),
            entailed: self.derivations.len(),
            passes: self.iterations,
        }
    }
}

/// Computes the closure of `asserted` under `rules`.
///
/// Fails with ARCO_ENGINE_DIVERGENCE if no fixpoint is reached within
/// `max_iterations` passes; the error carries the last batch added.
pub fn close(asserted: &Graph, rules: &RuleSet, max_iterations: usize) -> EngineResult<Closure> {
    let mut graph = asserted.clone();
    let mut derivations: BTreeMap<Fact, String> = BTreeMap::new();
    let mut last_batch: Vec<Fact> = Vec::new();

    for pass in 1..=max_iterations {
        let batch = run_pass(&graph, asserted, rules);
        if batch.is_empty() {
            return Ok(Closure {
                asserted: asserted.clone(),
                graph,
                derivations,
                iterations: pass,
            });
        }

        last_batch = batch.keys().cloned().collect();
        for (fact, rule_id) in batch {
            graph.insert(fact.clone());
            derivations.insert(fact, rule_id.to_string());
        }
    }

    Err(EngineError::divergence(max_iterations, last_batch))
}

/// One pass: new consequents of every rule, keyed by fact, first rule wins.
fn run_pass<'r>(graph: &Graph, asserted: &Graph, rules: &'r RuleSet) -> BTreeMap<Fact, &'r str> {
    let mut batch: BTreeMap<Fact, &str> = BTreeMap::new();
    for rule in rules.rules() {
        for bindings in match_all(graph, &rule.antecedents, &Bindings::new()) {
            if is_blocked(rule, asserted, &bindings) {
                continue;
            }
            if let Some(fact) = rule.consequent.instantiate(&bindings) {
                if !graph.contains(&fact) {
                    batch.entry(fact).or_insert(rule.id.as_str());
                }
            }
        }
    }
    batch
}

/// Guards are evaluated against asserted facts only.
fn is_blocked(rule: &Rule, asserted: &Graph, bindings: &Bindings) -> bool {
    match &rule.blocked_by {
        Some(guard) => any_match(asserted, std::slice::from_ref(guard), bindings),
        None => false,
    }
}
