//! Fixed rule, shape and gate configuration
//!
//! The catalog is configuration, not user data: it is built in code, checked
//! once by `RuleSet::new`, and shared read-only by every stage of a run.

mod annex_iii;

use crate::gates::Gate;
use crate::rules::{EngineResult, RuleSet};
use crate::shapes::ShapeSet;

/// Rules, shapes and gates used by one run
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: RuleSet,
    shapes: ShapeSet,
    gates: Vec<Gate>,
}

impl Catalog {
    /// Assembles a catalog from parts
    pub fn new(rules: RuleSet, shapes: ShapeSet, gates: Vec<Gate>) -> Self {
        Self {
            rules,
            shapes,
            gates,
        }
    }

    /// The EU AI Act Annex III 1(a) catalog
    pub fn annex_iii() -> EngineResult<Self> {
        Ok(Self::new(
            RuleSet::new(annex_iii::rules())?,
            ShapeSet::new(annex_iii::shapes()),
            annex_iii::gates(),
        ))
    }

    /// Rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Shape set
    pub fn shapes(&self) -> &ShapeSet {
        &self.shapes
    }

    /// Gates in evaluation order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Looks up a gate by id
    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }
}
