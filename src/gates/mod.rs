//! Gate evaluator
//!
//! A gate is a conjunction of fact patterns sharing variables, anchored on
//! the subject through the `?system` variable. It PASSes iff one joint
//! binding satisfies every conjunct at once.
//!
//! # Evaluation rules
//!
//! 1. Every gate is evaluated, in catalog order; a FAIL never short-circuits
//! 2. Gates read the closed graph and never modify it
//! 3. A FAIL names the unmet conjunct(s) and surfaces the gate's commitment

mod evaluator;
mod gate;

pub use evaluator::{evaluate, evaluate_gate, Commitment, FailureKind, GateOutcome, GateResult, UnmetConjunct};
pub use gate::{Conjunct, Gate, SUBJECT_VAR};
