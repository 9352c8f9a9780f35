//! Indexed fact store
//!
//! Facts are held in a `BTreeSet` plus one `BTreeMap` index per position,
//! so every lookup iterates in canonical order.
//!
//! # Lookup
//!
//! - Any bound position selects its index; with several bound positions the
//!   smallest candidate set is scanned and filtered
//! - No bound position falls back to a full scan

use std::collections::{BTreeMap, BTreeSet};

use super::fact::Fact;
use super::term::Term;
use crate::vocab;

/// Position index: term -> facts carrying that term in one position
type PositionIndex = BTreeMap<Term, BTreeSet<Fact>>;

/// A de-duplicated, deterministically ordered set of facts
#[derive(Debug, Clone, Default)]
pub struct Graph {
    facts: BTreeSet<Fact>,
    by_subject: PositionIndex,
    by_relation: PositionIndex,
    by_object: PositionIndex,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from facts, dropping exact duplicates
    pub fn from_facts<I: IntoIterator<Item = Fact>>(facts: I) -> Self {
        let mut graph = Self::new();
        for fact in facts {
            graph.insert(fact);
        }
        graph
    }

    /// Pure union of two graphs. Neither input is modified.
    pub fn merge(left: &Graph, right: &Graph) -> Graph {
        let mut merged = left.clone();
        for fact in right.iter() {
            merged.insert(fact.clone());
        }
        merged
    }

    /// Inserts a fact. Returns false if it was already present.
    pub fn insert(&mut self, fact: Fact) -> bool {
        if self.facts.contains(&fact) {
            return false;
        }
        self.by_subject
            .entry(fact.subject.clone())
            .or_default()
            .insert(fact.clone());
        self.by_relation
            .entry(fact.relation.clone())
            .or_default()
            .insert(fact.clone());
        self.by_object
            .entry(fact.object.clone())
            .or_default()
            .insert(fact.clone());
        self.facts.insert(fact)
    }

    /// Removes a fact. Returns false if it was not present.
    ///
    /// Only used to derive ablated input graphs; a closed graph is never
    /// shrunk.
    pub fn remove(&mut self, fact: &Fact) -> bool {
        if !self.facts.remove(fact) {
            return false;
        }
        Self::unindex(&mut self.by_subject, &fact.subject, fact);
        Self::unindex(&mut self.by_relation, &fact.relation, fact);
        Self::unindex(&mut self.by_object, &fact.object, fact);
        true
    }

    fn unindex(index: &mut PositionIndex, key: &Term, fact: &Fact) {
        if let Some(set) = index.get_mut(key) {
            set.remove(fact);
            if set.is_empty() {
                index.remove(key);
            }
        }
    }

    /// Returns true if the fact is present
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if the graph holds no facts
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterates all facts in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Returns true if every fact of `other` is present here
    pub fn is_superset_of(&self, other: &Graph) -> bool {
        other.facts.is_subset(&self.facts)
    }

    /// Facts present here but not in `other`, in canonical order
    pub fn difference<'a>(&'a self, other: &'a Graph) -> impl Iterator<Item = &'a Fact> {
        self.facts.difference(&other.facts)
    }

    /// Looks up facts by any combination of bound positions.
    ///
    /// Results are in canonical order.
    pub fn find(
        &self,
        subject: Option<&Term>,
        relation: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<&Fact> {
        let candidates: [Option<&BTreeSet<Fact>>; 3] = [
            subject.and_then(|t| self.by_subject.get(t)),
            relation.and_then(|t| self.by_relation.get(t)),
            object.and_then(|t| self.by_object.get(t)),
        ];

        // A bound position with no index entry means no match at all
        let bound = [subject.is_some(), relation.is_some(), object.is_some()];
        for (i, is_bound) in bound.iter().enumerate() {
            if *is_bound && candidates[i].is_none() {
                return Vec::new();
            }
        }

        let smallest = candidates.iter().flatten().min_by_key(|set| set.len());

        let matches = |fact: &&Fact| {
            subject.map_or(true, |s| &fact.subject == s)
                && relation.map_or(true, |r| &fact.relation == r)
                && object.map_or(true, |o| &fact.object == o)
        };

        match smallest {
            Some(set) => set.iter().filter(matches).collect(),
            None => self.facts.iter().collect(),
        }
    }

    /// Objects of `(subject, relation, ?)`, in canonical order
    pub fn objects(&self, subject: &Term, relation: &Term) -> Vec<&Term> {
        self.find(Some(subject), Some(relation), None)
            .into_iter()
            .map(|f| &f.object)
            .collect()
    }

    /// Subjects of `(?, relation, object)`, in canonical order
    pub fn subjects(&self, relation: &Term, object: &Term) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = self
            .find(None, Some(relation), Some(object))
            .into_iter()
            .map(|f| &f.subject)
            .collect();
        subjects.sort();
        subjects
    }

    /// Categories the entity is a member of
    pub fn types_of(&self, entity: &Term) -> Vec<&Term> {
        self.objects(entity, &Term::named(vocab::RDF_TYPE))
    }

    /// Returns true if `(entity rdf:type category)` is present
    pub fn has_type(&self, entity: &Term, category: &Term) -> bool {
        self.contains(&Fact::new(
            entity.clone(),
            Term::named(vocab::RDF_TYPE),
            category.clone(),
        ))
    }

    /// Members of a category, in canonical order
    pub fn instances_of(&self, category: &Term) -> Vec<&Term> {
        self.subjects(&Term::named(vocab::RDF_TYPE), category)
    }

    /// Returns true if some fact links `a` and `b` in either direction
    pub fn adjacent(&self, a: &Term, b: &Term) -> bool {
        !self.find(Some(a), None, Some(b)).is_empty()
            || !self.find(Some(b), None, Some(a)).is_empty()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.facts == other.facts
    }
}

impl Eq for Graph {}

impl FromIterator<Fact> for Graph {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        Graph::from_facts(iter)
    }
}
