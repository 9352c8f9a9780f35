//! Constraint validator
//!
//! Structural-completeness checks over the closed graph.
//!
//! # Semantics
//!
//! - Every member of a shape's target category is checked (inferred
//!   memberships count, since the closed graph is used)
//! - A link constraint counts distinct objects reached via its relation
//!   that are members of the required category
//! - A count below `min_count` produces one violation
//! - Validation never mutates the graph and never infers missing links

mod shape;
mod validator;

pub use shape::{LinkConstraint, Shape, ShapeSet};
pub use validator::{validate, ValidationReport, Violation};
