//! Shape records

use crate::graph::Term;

/// One required-link constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConstraint {
    /// Constraint name, unique within its shape
    pub name: String,
    /// Outgoing relation to follow
    pub relation: Term,
    /// Category the linked value must belong to
    pub required_category: Term,
    /// Minimum number of distinct qualifying values
    pub min_count: usize,
    /// What the constraint requires, in words
    pub description: String,
}

impl LinkConstraint {
    /// Constraint over named relation and category
    pub fn new(
        name: impl Into<String>,
        relation: &str,
        required_category: &str,
        min_count: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: Term::named(relation),
            required_category: Term::named(required_category),
            min_count,
            description: description.into(),
        }
    }
}

/// A target category plus the links its members must have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Stable shape id, e.g. `ARCO-S1`
    pub id: String,
    /// Category whose members are checked
    pub target_category: Term,
    /// Constraints, checked in order
    pub constraints: Vec<LinkConstraint>,
}

impl Shape {
    /// Shape targeting a named category
    pub fn new(id: impl Into<String>, target_category: &str) -> Self {
        Self {
            id: id.into(),
            target_category: Term::named(target_category),
            constraints: Vec::new(),
        }
    }

    /// Adds a constraint
    pub fn require(mut self, constraint: LinkConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Ordered list of shapes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeSet {
    shapes: Vec<Shape>,
}

impl ShapeSet {
    /// Wraps a shape list; order is the reporting order
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Shapes in order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if there are no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
