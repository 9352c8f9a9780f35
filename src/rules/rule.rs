//! Rule records and rule sets
//!
//! A rule is a named, closed record: antecedent patterns sharing variables,
//! one consequent pattern, and an optional blocking guard. There is no
//! open-ended semantics interpreter behind it; every derived fact is
//! attributable to exactly one rule id.
//!
//! # Static checks (`RuleSet::new`)
//!
//! - Rule ids are unique
//! - At least one antecedent
//! - Consequent and guard variables are bound by the antecedents
//! - Consequent relations are constants
//! - Guard relations are constants that no consequent derives (stratified
//!   negation over asserted facts only), so closure stays monotone

use std::collections::BTreeSet;

use super::errors::{EngineError, EngineResult};
use crate::graph::{FactPattern, Term};

/// How the evidence tracer reconstructs the support of a rule's conclusion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePlan {
    /// Relations walked from the subject, in order
    pub relations: Vec<Term>,
    /// Category the final node of the walk must be a member of
    pub qualifying_category: Term,
}

impl TracePlan {
    /// Plan over named relations and a named qualifying category
    pub fn new(relations: &[&str], qualifying_category: &str) -> Self {
        Self {
            relations: relations.iter().map(|r| Term::named(*r)).collect(),
            qualifying_category: Term::named(qualifying_category),
        }
    }
}

/// One inference rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Stable rule id, e.g. `ARCO-R4`
    pub id: String,
    /// Short human name
    pub name: String,
    /// Antecedent patterns; all must hold under one binding
    pub antecedents: Vec<FactPattern>,
    /// Fact derived for every antecedent binding
    pub consequent: FactPattern,
    /// Binding is skipped when this pattern matches an asserted fact
    pub blocked_by: Option<FactPattern>,
    /// Evidence reconstruction for classification rules
    pub trace: Option<TracePlan>,
}

impl Rule {
    /// Creates an unguarded rule without a trace plan
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        antecedents: Vec<FactPattern>,
        consequent: FactPattern,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            antecedents,
            consequent,
            blocked_by: None,
            trace: None,
        }
    }

    /// Adds a blocking guard
    pub fn blocked_by(mut self, guard: FactPattern) -> Self {
        self.blocked_by = Some(guard);
        self
    }

    /// Adds a trace plan
    pub fn traced(mut self, plan: TracePlan) -> Self {
        self.trace = Some(plan);
        self
    }

    /// Variables bound by the antecedents
    pub fn bound_variables(&self) -> BTreeSet<&str> {
        self.antecedents
            .iter()
            .flat_map(|p| p.variables())
            .collect()
    }

    /// Returns true if the consequent is `(?x rdf:type category)` for `category`
    pub fn concludes_type(&self, category: &Term) -> bool {
        self.consequent.relation.constant().map_or(false, |r| r.is_iri(crate::vocab::RDF_TYPE))
            && self.consequent.object.constant() == Some(category)
    }

    fn check(&self) -> EngineResult<()> {
        if self.antecedents.is_empty() {
            return Err(EngineError::invalid_ruleset(&self.id, "rule has no antecedents"));
        }

        let bound = self.bound_variables();

        for var in self.consequent.variables() {
            if !bound.contains(var) {
                return Err(EngineError::invalid_ruleset(
                    &self.id,
                    format!("consequent variable ?{} is not bound by any antecedent", var),
                ));
            }
        }
        if self.consequent.relation.constant().is_none() {
            return Err(EngineError::invalid_ruleset(
                &self.id,
                "consequent relation must be a constant",
            ));
        }

        if let Some(guard) = &self.blocked_by {
            for var in guard.variables() {
                if !bound.contains(var) {
                    return Err(EngineError::invalid_ruleset(
                        &self.id,
                        format!("guard variable ?{} is not bound by any antecedent", var),
                    ));
                }
            }
            if guard.relation.constant().is_none() {
                return Err(EngineError::invalid_ruleset(
                    &self.id,
                    "guard relation must be a constant",
                ));
            }
        }

        if let Some(plan) = &self.trace {
            if plan.relations.is_empty() {
                return Err(EngineError::invalid_ruleset(
                    &self.id,
                    "trace plan walks no relations",
                ));
            }
        }
        Ok(())
    }
}

/// An ordered, validated list of rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validates and wraps a rule list. Order is preserved and is the
    /// evaluation order within each pass.
    pub fn new(rules: Vec<Rule>) -> EngineResult<Self> {
        let mut ids = BTreeSet::new();
        for rule in &rules {
            if !ids.insert(rule.id.as_str()) {
                return Err(EngineError::invalid_ruleset(&rule.id, "duplicate rule id"));
            }
            rule.check()?;
        }

        let derived: BTreeSet<&Term> = rules
            .iter()
            .filter_map(|r| r.consequent.relation.constant())
            .collect();

        for rule in &rules {
            let guard_relation = rule
                .blocked_by
                .as_ref()
                .and_then(|g| g.relation.constant());
            if let Some(relation) = guard_relation {
                if derived.contains(relation) {
                    return Err(EngineError::invalid_ruleset(
                        &rule.id,
                        format!(
                            "guard relation {} is derivable by the rule set",
                            relation.compact()
                        ),
                    ));
                }
            }
        }

        Ok(Self { rules })
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Categories concluded by traced classification rules, in rule order
    pub fn classification_categories(&self) -> Vec<&Term> {
        let mut categories: Vec<&Term> = Vec::new();
        for rule in self.rules.iter().filter(|r| r.trace.is_some()) {
            if let Some(category) = rule.consequent.object.constant() {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
        categories
    }

    /// Looks up a rule by id
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
