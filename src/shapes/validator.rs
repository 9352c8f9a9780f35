//! Shape validation over a closed graph

use std::collections::BTreeSet;

use serde::Serialize;

use super::shape::{LinkConstraint, Shape, ShapeSet};
use crate::graph::{Graph, Term};

/// One unmet link constraint on one entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Violation {
    /// Entity that failed the constraint
    pub focus: Term,
    /// Shape id
    pub shape: String,
    /// Constraint name
    pub constraint: String,
    /// Relation the constraint follows
    pub relation: Term,
    /// Category the linked value must belong to
    pub required_category: Term,
    /// Required count
    pub min_count: usize,
    /// Observed count
    pub actual_count: usize,
    /// Human-readable summary
    pub message: String,
}

impl Violation {
    fn new(focus: &Term, shape: &Shape, constraint: &LinkConstraint, actual_count: usize) -> Self {
        let message = format!(
            "{} has {} {} link(s) to {}; at least {} required ({})",
            focus.short(),
            actual_count,
            constraint.relation.short(),
            constraint.required_category.short(),
            constraint.min_count,
            constraint.description
        );
        Self {
            focus: focus.clone(),
            shape: shape.id.clone(),
            constraint: constraint.name.clone(),
            relation: constraint.relation.clone(),
            required_category: constraint.required_category.clone(),
            min_count: constraint.min_count,
            actual_count,
            message,
        }
    }
}

/// Outcome of validating a graph against a shape set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True iff `violations` is empty
    pub conforms: bool,
    /// Violations in shape order, then focus order, then constraint order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Violations whose focus is `entity`
    pub fn violations_for<'a>(&'a self, entity: &'a Term) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| &v.focus == entity)
    }
}

/// Validates `graph` against every shape.
pub fn validate(graph: &Graph, shapes: &ShapeSet) -> ValidationReport {
    let mut violations = Vec::new();

    for shape in shapes.shapes() {
        for focus in graph.instances_of(&shape.target_category) {
            for constraint in &shape.constraints {
                let actual = count_qualifying(graph, focus, constraint);
                if actual < constraint.min_count {
                    violations.push(Violation::new(focus, shape, constraint, actual));
                }
            }
        }
    }

    ValidationReport {
        conforms: violations.is_empty(),
        violations,
    }
}

/// Distinct objects of `(focus, relation, ?)` that belong to the required category.
fn count_qualifying(graph: &Graph, focus: &Term, constraint: &LinkConstraint) -> usize {
    graph
        .objects(focus, &constraint.relation)
        .into_iter()
        .filter(|object| graph.has_type(object, &constraint.required_category))
        .collect::<BTreeSet<_>>()
        .len()
}
