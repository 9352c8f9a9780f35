//! Determination pipeline
//!
//! Sequences the stages of a run and hosts the two diagnostic operations
//! built on top of them: gate ablation and the relation-first proof view.

mod ablation;
mod errors;
mod proof_view;
mod run;

pub use ablation::{ablate, ablate_graph, AblationReport, AblationTrial, ClassificationHold, GateAblation};
pub use errors::{PipelineError, PipelineResult};
pub use proof_view::{proof_view, render as render_proof_view, ProofView, Provenance, ViewCounts, ViewFact};
pub use run::{close, determine, evaluate, load, request, Outcome};
