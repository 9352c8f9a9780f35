//! Gate evaluation and failure diagnosis

use std::fmt;

use serde::Serialize;

use super::gate::{Gate, SUBJECT_VAR};
use crate::graph::{match_all, seed, Bindings, Fact, FactPattern, Graph, Term};

/// PASS / FAIL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateOutcome {
    Pass,
    Fail,
}

impl GateOutcome {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Pass => "PASS",
            GateOutcome::Fail => "FAIL",
        }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a gate failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Some conjunct has no binding at all for the subject
    MissingEvidence,
    /// Every conjunct holds on its own, but no single binding joins them
    Unlinked,
}

/// A conjunct that blocked the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetConjunct {
    /// Position within the gate
    pub index: usize,
    /// Compact rendering of the pattern
    pub pattern: String,
    /// Evidence it stands for
    pub commitment: String,
}

/// Result of one gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateResult {
    pub gate_id: String,
    pub name: String,
    pub outcome: GateOutcome,
    /// Smallest joint binding (PASS only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness: Option<Bindings>,
    /// Conjuncts instantiated under the witness (PASS only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub witness_facts: Vec<Fact>,
    /// FAIL only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
    /// FAIL only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmet: Vec<UnmetConjunct>,
}

impl GateResult {
    /// Returns true on PASS
    pub fn passed(&self) -> bool {
        self.outcome == GateOutcome::Pass
    }
}

/// Evidence that a failing gate asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commitment {
    pub gate_id: String,
    pub gate_name: String,
    /// Gate-level commitment text
    pub description: String,
    /// Commitment text of each unmet conjunct
    pub unmet: Vec<String>,
}

impl Commitment {
    /// Commitment of a failed gate; None on PASS
    pub fn from_result(gate: &Gate, result: &GateResult) -> Option<Self> {
        if result.passed() {
            return None;
        }
        Some(Self {
            gate_id: gate.id.clone(),
            gate_name: gate.name.clone(),
            description: gate.commitment.clone(),
            unmet: result.unmet.iter().map(|u| u.commitment.clone()).collect(),
        })
    }
}

/// Evaluates every gate for `subject`, in order. Never short-circuits.
pub fn evaluate(graph: &Graph, gates: &[Gate], subject: &Term) -> Vec<GateResult> {
    gates
        .iter()
        .map(|gate| evaluate_gate(graph, gate, subject))
        .collect()
}

/// Evaluates one gate for `subject`.
pub fn evaluate_gate(graph: &Graph, gate: &Gate, subject: &Term) -> GateResult {
    let anchor = seed(SUBJECT_VAR, subject);
    let patterns = gate.patterns();

    let joint = match_all(graph, &patterns, &anchor);
    if let Some(witness) = joint.into_iter().next() {
        let witness_facts = patterns
            .iter()
            .filter_map(|p| p.instantiate(&witness))
            .collect();
        return GateResult {
            gate_id: gate.id.clone(),
            name: gate.name.clone(),
            outcome: GateOutcome::Pass,
            witness: Some(witness),
            witness_facts,
            failure_kind: None,
            unmet: Vec::new(),
        };
    }

    let (failure_kind, unmet_indexes) = diagnose(graph, &patterns, &anchor);
    let unmet = unmet_indexes
        .into_iter()
        .map(|index| UnmetConjunct {
            index,
            pattern: patterns[index].to_string(),
            commitment: gate.conjuncts[index].commitment.clone(),
        })
        .collect();

    GateResult {
        gate_id: gate.id.clone(),
        name: gate.name.clone(),
        outcome: GateOutcome::Fail,
        witness: None,
        witness_facts: Vec::new(),
        failure_kind: Some(failure_kind),
        unmet,
    }
}

/// Conjuncts with no standalone binding are missing evidence. If each holds
/// alone, the first conjunct at which the progressive join empties is the
/// one left unlinked.
fn diagnose(graph: &Graph, patterns: &[FactPattern], anchor: &Bindings) -> (FailureKind, Vec<usize>) {
    let missing: Vec<usize> = patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| p.matches(graph, anchor).is_empty())
        .map(|(i, _)| i)
        .collect();
    if !missing.is_empty() {
        return (FailureKind::MissingEvidence, missing);
    }

    let breaking = (1..=patterns.len())
        .find(|&n| match_all(graph, &patterns[..n], anchor).is_empty())
        .map(|n| n - 1)
        .unwrap_or(0);
    (FailureKind::Unlinked, vec![breaking])
}
