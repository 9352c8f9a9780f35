//! Graph store and term model
//!
//! # Components
//!
//! - `Term` / `Fact`: immutable, totally ordered by canonical form
//! - `Graph`: de-duplicated fact set with subject/relation/object indexes
//! - `FactPattern` / `Bindings`: conjunctive pattern matching
//! - `loader` / `ntriples`: source parsing and canonical serialization
//!
//! # Determinism
//!
//! Every iteration (facts, lookups, bindings) follows canonical order, so any
//! tie-breaking built on top of it is reproducible across runs and hosts.

mod errors;
mod fact;
pub mod loader;
pub mod ntriples;
mod pattern;
mod store;
mod term;

pub use errors::{LoadError, LoadErrorCode, LoadResult, Severity};
pub use fact::Fact;
pub use loader::{load, FactSource, SourceFormat};
pub use pattern::{any_match, match_all, pattern, position, seed, Bindings, FactPattern, PatternTerm};
pub use store::Graph;
pub use term::Term;
