//! Fact (triple) definition
//!
//! Facts are immutable once created and totally ordered by the canonical
//! form of (subject, relation, object).

use std::fmt;

use serde::Serialize;

use super::term::Term;
use crate::vocab;

/// A single (subject, relation, object) fact
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Fact {
    /// Subject term (named or anonymous)
    pub subject: Term,
    /// Relation term (always named)
    pub relation: Term,
    /// Object term
    pub object: Term,
}

impl Fact {
    /// Create a fact from three terms
    pub fn new(subject: Term, relation: Term, object: Term) -> Self {
        Self {
            subject,
            relation,
            object,
        }
    }

    /// Create a fact whose three positions are named entities
    pub fn named(subject: &str, relation: &str, object: &str) -> Self {
        Self::new(Term::named(subject), Term::named(relation), Term::named(object))
    }

    /// N-Triples line for this fact, without trailing newline
    pub fn canonical(&self) -> String {
        format!(
            "{} {} {} .",
            self.subject.canonical(),
            self.relation.canonical(),
            self.object.canonical()
        )
    }

    /// Compact rendering for human-facing output
    pub fn compact(&self) -> String {
        format!(
            "{} {} {}",
            self.subject.compact(),
            self.relation.compact(),
            self.object.compact()
        )
    }

    /// Short rendering using local names and relation labels: `S --relation--> O`
    pub fn short(&self) -> String {
        let relation = match &self.relation {
            Term::Named(iri) => vocab::label(iri),
            other => other.short(),
        };
        format!("{} --{}--> {}", self.subject.short(), relation, self.object.short())
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
