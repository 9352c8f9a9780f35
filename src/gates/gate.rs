//! Gate records

use crate::graph::FactPattern;

/// Variable every gate binds to the subject entity
pub const SUBJECT_VAR: &str = "system";

/// One conjunct of a gate query, with the evidence it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunct {
    /// Pattern to match
    pub pattern: FactPattern,
    /// What must be committed to for this pattern to hold
    pub commitment: String,
}

impl Conjunct {
    /// Creates a conjunct
    pub fn new(pattern: FactPattern, commitment: impl Into<String>) -> Self {
        Self {
            pattern,
            commitment: commitment.into(),
        }
    }
}

/// An independent evidentiary check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// Stable gate id, e.g. `GATE-2`
    pub id: String,
    /// Short name, e.g. `intended-use`
    pub name: String,
    /// Commitment surfaced when the gate fails
    pub commitment: String,
    /// Conjuncts, joined in order
    pub conjuncts: Vec<Conjunct>,
}

impl Gate {
    /// Creates a gate without conjuncts
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        commitment: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            commitment: commitment.into(),
            conjuncts: Vec::new(),
        }
    }

    /// Adds a conjunct
    pub fn and(mut self, pattern: FactPattern, commitment: impl Into<String>) -> Self {
        self.conjuncts.push(Conjunct::new(pattern, commitment));
        self
    }

    /// Conjunct patterns, in order
    pub fn patterns(&self) -> Vec<FactPattern> {
        self.conjuncts.iter().map(|c| c.pattern.clone()).collect()
    }
}
