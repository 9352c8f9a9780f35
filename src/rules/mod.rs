//! Rule engine
//!
//! Computes the deductive closure of an asserted graph under a fixed,
//! explicitly listed rule set.
//!
//! # Principles
//!
//! 1. Rules are closed records, never an open-ended interpreter
//! 2. Closure only adds facts
//! 3. Every derived fact names the rule that produced it
//! 4. Non-termination is converted into a fatal, diagnosable error

mod engine;
mod errors;
mod rule;

pub use engine::{close, Closure, ClosureStats, DEFAULT_MAX_ITERATIONS};
pub use errors::{EngineError, EngineErrorCode, EngineResult};
pub use rule::{Rule, RuleSet, TracePlan};
