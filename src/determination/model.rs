//! Determination object model
//!
//! Field order here is the key order of the machine-readable record.

use std::fmt;

use serde::Serialize;

use crate::gates::{Commitment, GateResult};
use crate::graph::{Fact, Term};
use crate::rules::ClosureStats;
use crate::shapes::Violation;
use crate::trace::EvidencePath;

/// Record format identifier
pub const FORMAT_VERSION: &str = "arco-determination/1";

/// Three-way outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationState {
    Entailed,
    Underdetermined,
    NotEntailed,
}

impl ClassificationState {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationState::Entailed => "ENTAILED",
            ClassificationState::Underdetermined => "UNDERDETERMINED",
            ClassificationState::NotEntailed => "NOT_ENTAILED",
        }
    }
}

impl fmt::Display for ClassificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the classification fact came to be in the closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationMode {
    /// Derived by a rule
    Inferred,
    /// Present in the input
    Asserted,
    /// Not in the closure
    Absent,
}

impl ClassificationMode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationMode::Inferred => "INFERRED",
            ClassificationMode::Asserted => "ASSERTED",
            ClassificationMode::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A violation plus whether it bears on the subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintFinding {
    #[serde(flatten)]
    pub violation: Violation,
    /// Focus is the subject or one fact away from it
    pub affects_subject: bool,
}

/// Explicit exclusion that makes the subject not applicable to the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contradiction {
    /// `(subject notApplicableTo target)`
    pub fact: Fact,
    /// Rule that derived it; None when it was asserted
    pub rule_id: Option<String>,
}

/// The immutable result of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Determination {
    pub(crate) format_version: &'static str,
    pub(crate) profile: Option<String>,
    pub(crate) subject: Term,
    pub(crate) target_category: Term,
    pub(crate) state: ClassificationState,
    pub(crate) mode: ClassificationMode,
    pub(crate) triggering_category: Option<Term>,
    pub(crate) triggering_rule: Option<String>,
    pub(crate) gate_results: Vec<GateResult>,
    pub(crate) conforms: bool,
    pub(crate) constraint_violations: Vec<ConstraintFinding>,
    pub(crate) evidence_path: Option<EvidencePath>,
    pub(crate) missing_commitments: Vec<Commitment>,
    pub(crate) contradiction: Option<Contradiction>,
    pub(crate) closure: ClosureStats,
}

impl Determination {
    pub fn format_version(&self) -> &str {
        self.format_version
    }

    /// Profile name, when the run was started from one
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn target_category(&self) -> &Term {
        &self.target_category
    }

    pub fn state(&self) -> ClassificationState {
        self.state
    }

    pub fn mode(&self) -> ClassificationMode {
        self.mode
    }

    /// Most specific qualifying category on the evidence path
    pub fn triggering_category(&self) -> Option<&Term> {
        self.triggering_category.as_ref()
    }

    /// Rule that derived the classification fact
    pub fn triggering_rule(&self) -> Option<&str> {
        self.triggering_rule.as_deref()
    }

    /// Every gate, in catalog order
    pub fn gate_results(&self) -> &[GateResult] {
        &self.gate_results
    }

    /// Global conformance (all shapes, all entities)
    pub fn conforms(&self) -> bool {
        self.conforms
    }

    pub fn constraint_violations(&self) -> &[ConstraintFinding] {
        &self.constraint_violations
    }

    /// Violations that bear on the subject
    pub fn subject_violations(&self) -> impl Iterator<Item = &ConstraintFinding> {
        self.constraint_violations.iter().filter(|f| f.affects_subject)
    }

    pub fn evidence_path(&self) -> Option<&EvidencePath> {
        self.evidence_path.as_ref()
    }

    /// One entry per failing gate, in gate order
    pub fn missing_commitments(&self) -> &[Commitment] {
        &self.missing_commitments
    }

    pub fn contradiction(&self) -> Option<&Contradiction> {
        self.contradiction.as_ref()
    }

    pub fn closure_stats(&self) -> ClosureStats {
        self.closure
    }

    /// The classification fact this record is about
    pub fn triggering_fact(&self) -> Fact {
        Fact::new(
            self.subject.clone(),
            Term::named(crate::vocab::RDF_TYPE),
            self.target_category.clone(),
        )
    }
}
