//! Layered path reconstruction

use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::{Fact, Graph, Term};
use crate::rules::{Closure, Rule, RuleSet, TracePlan};
use crate::vocab;

/// Supporting chain for one classification fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidencePath {
    /// Rule whose relation sequence was followed
    pub rule_id: String,
    /// One fact per relation hop, starting at the subject
    pub steps: Vec<Fact>,
    /// Membership of the final node in the qualifying category
    pub qualifying_fact: Fact,
    /// Most specific qualifying category of the final node
    pub triggering_category: Term,
}

impl EvidencePath {
    /// Number of relation hops
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the path has no hops
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps followed by the qualifying fact
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.steps.iter().chain(std::iter::once(&self.qualifying_fact))
    }

    /// Node the walk ends on
    pub fn terminal(&self) -> &Term {
        &self.qualifying_fact.subject
    }
}

/// Traces `(subject rdf:type target)` through the closure.
///
/// Returns None when the fact is absent, when no rule with a trace plan
/// concludes `target`, or when the closure holds no qualifying walk.
/// None is not an error.
pub fn trace(closure: &Closure, rules: &RuleSet, subject: &Term, target: &Term) -> Option<EvidencePath> {
    let graph = closure.graph();
    let triggering = Fact::new(subject.clone(), Term::named(vocab::RDF_TYPE), target.clone());
    if !graph.contains(&triggering) {
        return None;
    }

    let rule = tracing_rule(closure, rules, &triggering, target)?;
    let plan = rule.trace.as_ref()?;
    let steps = walk(graph, subject, plan)?;

    let terminal = steps
        .last()
        .map(|f| f.object.clone())
        .unwrap_or_else(|| subject.clone());
    let qualifying_fact = Fact::new(
        terminal.clone(),
        Term::named(vocab::RDF_TYPE),
        plan.qualifying_category.clone(),
    );
    let triggering_category = most_specific_category(graph, &terminal, &plan.qualifying_category);

    Some(EvidencePath {
        rule_id: rule.id.clone(),
        steps,
        qualifying_fact,
        triggering_category,
    })
}

/// The deriving rule when it has a trace plan, else the first traced rule
/// concluding `target` (covers asserted classification facts).
fn tracing_rule<'r>(
    closure: &Closure,
    rules: &'r RuleSet,
    triggering: &Fact,
    target: &Term,
) -> Option<&'r Rule> {
    closure
        .derived_by(triggering)
        .and_then(|id| rules.get(id))
        .filter(|rule| rule.trace.is_some())
        .or_else(|| {
            rules
                .rules()
                .iter()
                .find(|rule| rule.trace.is_some() && rule.concludes_type(target))
        })
}

/// Forward layers, backward pruning to qualifying terminals, then a greedy
/// smallest-first walk through the pruned layers.
fn walk(graph: &Graph, subject: &Term, plan: &TracePlan) -> Option<Vec<Fact>> {
    let hops = plan.relations.len();

    let mut layers: Vec<BTreeSet<&Term>> = Vec::with_capacity(hops + 1);
    layers.push(BTreeSet::from([subject]));
    for relation in &plan.relations {
        let next: BTreeSet<&Term> = layers[layers.len() - 1]
            .iter()
            .flat_map(|node| graph.objects(node, relation))
            .filter(|object| !object.is_literal())
            .collect();
        if next.is_empty() {
            return None;
        }
        layers.push(next);
    }

    let mut viable: Vec<BTreeSet<&Term>> = vec![BTreeSet::new(); hops + 1];
    viable[hops] = layers[hops]
        .iter()
        .copied()
        .filter(|node| graph.has_type(node, &plan.qualifying_category))
        .collect();
    for depth in (0..hops).rev() {
        let relation = &plan.relations[depth];
        viable[depth] = layers[depth]
            .iter()
            .copied()
            .filter(|node| {
                graph
                    .objects(node, relation)
                    .into_iter()
                    .any(|object| viable[depth + 1].contains(object))
            })
            .collect();
    }
    if !viable[0].contains(subject) {
        return None;
    }

    let mut steps = Vec::with_capacity(hops);
    let mut node = subject;
    for (depth, relation) in plan.relations.iter().enumerate() {
        // objects() is ordered, so the first viable one is the smallest
        let next = graph
            .objects(node, relation)
            .into_iter()
            .find(|object| viable[depth + 1].contains(object))?;
        steps.push(Fact::new(node.clone(), relation.clone(), next.clone()));
        node = next;
    }
    Some(steps)
}

/// Among the node's categories that are `qualifying` or below it, the one
/// with no other candidate beneath it; ties go to the smallest term.
fn most_specific_category(graph: &Graph, node: &Term, qualifying: &Term) -> Term {
    let subclass_of = Term::named(vocab::RDFS_SUBCLASS_OF);
    let is_below = |lower: &Term, upper: &Term| {
        graph.contains(&Fact::new(lower.clone(), subclass_of.clone(), upper.clone()))
    };

    let candidates: Vec<&Term> = graph
        .types_of(node)
        .into_iter()
        .filter(|category| *category == qualifying || is_below(*category, qualifying))
        .collect();

    candidates
        .iter()
        .copied()
        .find(|category| {
            !candidates
                .iter()
                .any(|other| other != category && is_below(*other, *category))
        })
        .unwrap_or(qualifying)
        .clone()
}
