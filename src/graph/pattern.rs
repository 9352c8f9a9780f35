//! Fact patterns and variable bindings
//!
//! A pattern position is either a constant term or a named variable.
//! Matching a conjunction of patterns yields the set of joint bindings
//! satisfying every conjunct at once, sorted and de-duplicated so that
//! downstream tie-breaking sees the same order on every run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::fact::Fact;
use super::store::Graph;
use super::term::Term;

/// Variable name -> bound term, ordered by variable name
pub type Bindings = BTreeMap<String, Term>;

/// One position of a fact pattern
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PatternTerm {
    /// Named variable (written `?name`)
    Var(String),
    /// Constant term
    Const(Term),
}

impl PatternTerm {
    /// Variable position
    pub fn var(name: impl Into<String>) -> Self {
        PatternTerm::Var(name.into())
    }

    /// Constant named-entity position
    pub fn iri(iri: impl Into<String>) -> Self {
        PatternTerm::Const(Term::named(iri))
    }

    /// Returns the variable name, if this position is a variable
    pub fn var_name(&self) -> Option<&str> {
        match self {
            PatternTerm::Var(name) => Some(name),
            PatternTerm::Const(_) => None,
        }
    }

    /// Returns the constant term, if this position is constant
    pub fn constant(&self) -> Option<&Term> {
        match self {
            PatternTerm::Const(term) => Some(term),
            PatternTerm::Var(_) => None,
        }
    }

    /// Resolves against bindings: constants as-is, bound variables to their term
    pub fn resolve<'a>(&'a self, bindings: &'a Bindings) -> Option<&'a Term> {
        match self {
            PatternTerm::Const(term) => Some(term),
            PatternTerm::Var(name) => bindings.get(name),
        }
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Var(name) => write!(f, "?{}", name),
            PatternTerm::Const(term) => write!(f, "{}", term.compact()),
        }
    }
}

/// A fact with variables allowed in any position
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FactPattern {
    pub subject: PatternTerm,
    pub relation: PatternTerm,
    pub object: PatternTerm,
}

impl FactPattern {
    /// Create a pattern from three positions
    pub fn new(subject: PatternTerm, relation: PatternTerm, object: PatternTerm) -> Self {
        Self {
            subject,
            relation,
            object,
        }
    }

    /// Variables used by this pattern
    pub fn variables(&self) -> BTreeSet<&str> {
        [&self.subject, &self.relation, &self.object]
            .into_iter()
            .filter_map(|p| p.var_name())
            .collect()
    }

    /// Builds the fact this pattern denotes under `bindings`.
    ///
    /// Returns None if any variable is unbound.
    pub fn instantiate(&self, bindings: &Bindings) -> Option<Fact> {
        Some(Fact::new(
            self.subject.resolve(bindings)?.clone(),
            self.relation.resolve(bindings)?.clone(),
            self.object.resolve(bindings)?.clone(),
        ))
    }

    /// Extends `seed` with every fact of `graph` matching this pattern.
    pub fn matches(&self, graph: &Graph, seed: &Bindings) -> Vec<Bindings> {
        let subject = self.subject.resolve(seed);
        let relation = self.relation.resolve(seed);
        let object = self.object.resolve(seed);

        let mut results = Vec::new();
        for fact in graph.find(subject, relation, object) {
            let mut extended = seed.clone();
            if bind(&mut extended, &self.subject, &fact.subject)
                && bind(&mut extended, &self.relation, &fact.relation)
                && bind(&mut extended, &self.object, &fact.object)
            {
                results.push(extended);
            }
        }
        results
    }
}

impl fmt::Display for FactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.relation, self.object)
    }
}

/// Binds a variable position to a term, failing on a conflicting binding.
///
/// Handles patterns that repeat a variable, e.g. `?x p ?x`.
fn bind(bindings: &mut Bindings, position: &PatternTerm, term: &Term) -> bool {
    match position {
        PatternTerm::Const(constant) => constant == term,
        PatternTerm::Var(name) => match bindings.get(name) {
            Some(existing) => existing == term,
            None => {
                bindings.insert(name.clone(), term.clone());
                true
            }
        },
    }
}

/// Joint bindings satisfying every pattern, sorted and de-duplicated.
pub fn match_all(graph: &Graph, patterns: &[FactPattern], seed: &Bindings) -> Vec<Bindings> {
    let mut current = vec![seed.clone()];
    for pattern in patterns {
        let mut next = Vec::new();
        for bindings in &current {
            next.extend(pattern.matches(graph, bindings));
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current.sort();
    current.dedup();
    current
}

/// Returns true if at least one joint binding exists.
pub fn any_match(graph: &Graph, patterns: &[FactPattern], seed: &Bindings) -> bool {
    !match_all(graph, patterns, seed).is_empty()
}

/// Shorthand for building a seed with one bound variable.
pub fn seed(name: &str, term: &Term) -> Bindings {
    let mut bindings = Bindings::new();
    bindings.insert(name.to_string(), term.clone());
    bindings
}

/// Parses a compact pattern position: `?name` is a variable, anything else
/// is an absolute IRI constant.
pub fn position(text: &str) -> PatternTerm {
    match text.strip_prefix('?') {
        Some(name) => PatternTerm::var(name),
        None => PatternTerm::iri(text),
    }
}

/// Builds a pattern from three compact positions.
pub fn pattern(subject: &str, relation: &str, object: &str) -> FactPattern {
    FactPattern::new(position(subject), position(relation), position(object))
}
