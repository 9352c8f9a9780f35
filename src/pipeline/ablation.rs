//! Gate ablation
//!
//! For each gate that passes on the full input, every asserted fact of its
//! witness is removed in turn and the evaluation re-run. A gate whose
//! outcome does not flip when a witness fact is removed has another
//! derivation of that evidence.
//!
//! Each trial also records which catalog classifications still hold for the
//! subject, so a removal that breaks one classification can be seen to
//! leave another intact.

use serde::Serialize;

use super::errors::PipelineResult;
use super::run::{evaluate, load};
use crate::catalog::Catalog;
use crate::config::RunConfig;
use crate::determination::ClassificationState;
use crate::gates::GateOutcome;
use crate::graph::{Fact, Graph, Term};
use crate::rules::Closure;
use crate::vocab;

/// One removal and what it changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AblationTrial {
    /// Asserted fact removed from the input
    pub removed: Fact,
    /// Classification state without it
    pub state: ClassificationState,
    /// Outcome of the ablated gate without it
    pub gate_outcome: GateOutcome,
    /// True if the gate no longer passes
    pub flipped: bool,
    /// Every catalog classification and whether the subject still has it
    pub classifications: Vec<ClassificationHold>,
}

/// Whether one classification fact is in the closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationHold {
    pub category: Term,
    pub held: bool,
}

impl AblationTrial {
    /// Returns whether `category` still held after the removal
    pub fn holds(&self, category: &str) -> Option<bool> {
        self.classifications
            .iter()
            .find(|c| c.category.is_iri(category))
            .map(|c| c.held)
    }
}

/// Trials for one passing gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateAblation {
    pub gate_id: String,
    pub name: String,
    pub trials: Vec<AblationTrial>,
    /// Witness facts that are not in the input and cannot be removed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entailed_witnesses: Vec<Fact>,
}

/// Result of ablating every passing gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AblationReport {
    pub subject: Term,
    pub target_category: Term,
    pub baseline: ClassificationState,
    /// Passing gates, in catalog order
    pub gates: Vec<GateAblation>,
    /// Gates that failed on the full input and were not ablated
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failing_gates: Vec<String>,
}

impl AblationReport {
    /// Returns true if every trial flipped its gate
    pub fn all_flipped(&self) -> bool {
        self.gates
            .iter()
            .flat_map(|g| g.trials.iter())
            .all(|t| t.flipped)
    }
}

/// Loads the configured sources and ablates every passing gate.
pub fn ablate(config: &RunConfig, catalog: &Catalog) -> PipelineResult<AblationReport> {
    let graph = load(config)?;
    ablate_graph(&graph, config, catalog)
}

/// Ablates every passing gate of an already loaded graph.
pub fn ablate_graph(
    graph: &Graph,
    config: &RunConfig,
    catalog: &Catalog,
) -> PipelineResult<AblationReport> {
    let baseline = evaluate(graph, config, catalog)?.into_determination();

    let mut gates = Vec::new();
    let mut failing_gates = Vec::new();
    for result in baseline.gate_results() {
        if !result.passed() {
            failing_gates.push(result.gate_id.clone());
            continue;
        }

        let (asserted, entailed): (Vec<&Fact>, Vec<&Fact>) = result
            .witness_facts
            .iter()
            .partition(|fact| graph.contains(fact));

        let mut trials = Vec::with_capacity(asserted.len());
        for fact in asserted {
            let mut ablated = graph.clone();
            ablated.remove(fact);
            let outcome = evaluate(&ablated, config, catalog)?;
            let classifications = classifications(outcome.closure(), config.subject(), catalog);
            let rerun = outcome.into_determination();
            let gate_outcome = rerun
                .gate_results()
                .iter()
                .find(|r| r.gate_id == result.gate_id)
                .map_or(GateOutcome::Fail, |r| r.outcome);
            trials.push(AblationTrial {
                removed: fact.clone(),
                state: rerun.state(),
                gate_outcome,
                flipped: gate_outcome == GateOutcome::Fail,
                classifications,
            });
        }

        gates.push(GateAblation {
            gate_id: result.gate_id.clone(),
            name: result.name.clone(),
            trials,
            entailed_witnesses: entailed.into_iter().cloned().collect(),
        });
    }

    Ok(AblationReport {
        subject: baseline.subject().clone(),
        target_category: baseline.target_category().clone(),
        baseline: baseline.state(),
        gates,
        failing_gates,
    })
}

fn classifications(closure: &Closure, subject: &Term, catalog: &Catalog) -> Vec<ClassificationHold> {
    let rdf_type = Term::named(vocab::RDF_TYPE);
    catalog
        .rules()
        .classification_categories()
        .into_iter()
        .map(|category| ClassificationHold {
            category: category.clone(),
            held: closure
                .graph()
                .contains(&Fact::new(subject.clone(), rdf_type.clone(), category.clone())),
        })
        .collect()
}
