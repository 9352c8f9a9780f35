//! Evidence tracer
//!
//! Reconstructs the chain of facts that supports a classification fact,
//! following only the relation sequence of the rule that derived it.
//!
//! # Determinism
//!
//! The search is breadth-first by relation layer. Among nodes that can
//! still reach a qualifying terminal, the smallest canonical term is taken
//! at every depth, so the same closure always yields the same path.

mod tracer;

pub use tracer::{trace, EvidencePath};
