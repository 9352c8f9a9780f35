//! Determination record and assembler
//!
//! A determination is built exactly once per run from the frozen outputs of
//! the earlier stages and is never mutated afterwards. Every artifact is a
//! projection of this one record.
//!
//! # States
//!
//! - ENTAILED: the classification fact is in the closure and no violation
//!   touches the subject
//! - NOT_ENTAILED: the classification fact is absent and an explicit
//!   exclusion makes the subject not applicable to the target
//! - UNDERDETERMINED: everything else (the evidence-insufficient default)

mod assembler;
mod model;

pub use assembler::{assemble, ClassificationRequest, Findings};
pub use model::{
    ClassificationMode, ClassificationState, ConstraintFinding, Contradiction, Determination,
    FORMAT_VERSION,
};
