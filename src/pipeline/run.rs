//! Stage sequencing
//!
//! load -> close -> validate -> gates -> trace -> assemble
//!
//! Each stage consumes only frozen outputs of the stages before it. The
//! fallible stages are bracketed by observation scopes; the rest log one
//! typed event with their summary.

use super::errors::{PipelineError, PipelineResult};
use crate::catalog::Catalog;
use crate::config::RunConfig;
use crate::determination::{assemble, ClassificationRequest, Determination, Findings};
use crate::gates;
use crate::graph::{self, Graph};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::rules::{self, Closure, EngineErrorCode};
use crate::shapes;
use crate::trace;

/// Closure and determination of one run
#[derive(Debug, Clone)]
pub struct Outcome {
    closure: Closure,
    determination: Determination,
}

impl Outcome {
    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    pub fn determination(&self) -> &Determination {
        &self.determination
    }

    pub fn into_determination(self) -> Determination {
        self.determination
    }
}

/// Runs every stage for the configured subject and target.
pub fn determine(config: &RunConfig, catalog: &Catalog) -> PipelineResult<Outcome> {
    let profile = config.profile().map_or("none", |p| p.as_str());
    let subject = config.subject().compact();
    let target = config.target().compact();
    log_event_with_fields(
        Event::RunBegin,
        &[
            ("profile", profile),
            ("subject", subject.as_str()),
            ("target", target.as_str()),
        ],
    );

    let result = load(config).and_then(|graph| evaluate(&graph, config, catalog));
    match &result {
        Ok(outcome) => {
            let d = outcome.determination();
            log_event_with_fields(
                Event::RunComplete,
                &[("state", d.state().as_str()), ("mode", d.mode().as_str())],
            );
        }
        Err(err) => log_event_with_fields(Event::RunFailed, &[("code", err.code())]),
    }
    result
}

/// Loads and merges the configured sources.
pub fn load(config: &RunConfig) -> PipelineResult<Graph> {
    let sources = config.sources().len().to_string();
    let scope = ObservationScope::with_fields("LOAD", &[("sources", sources.as_str())]);
    match graph::load(config.sources()) {
        Ok(graph) => {
            let facts = graph.len().to_string();
            scope.complete_with_fields(&[("facts", facts.as_str())]);
            Ok(graph)
        }
        Err(err) => {
            scope.fail(&err);
            Err(err.into())
        }
    }
}

/// Evaluates an already loaded graph.
pub fn evaluate(graph: &Graph, config: &RunConfig, catalog: &Catalog) -> PipelineResult<Outcome> {
    let closure = close(graph, config, catalog)?;
    let request = request(config);
    let subject = &request.subject;
    let target = &request.target;

    let validation = shapes::validate(closure.graph(), catalog.shapes());
    let violations = validation.violations.len().to_string();
    log_event_with_fields(
        Event::ValidationComplete,
        &[
            ("conforms", if validation.conforms { "true" } else { "false" }),
            ("violations", violations.as_str()),
        ],
    );

    let gate_results = gates::evaluate(closure.graph(), catalog.gates(), subject);
    let passed = gate_results.iter().filter(|r| r.passed()).count().to_string();
    let total = gate_results.len().to_string();
    log_event_with_fields(
        Event::GatesEvaluated,
        &[("passed", passed.as_str()), ("total", total.as_str())],
    );

    let evidence = trace::trace(&closure, catalog.rules(), subject, target);
    let steps = evidence.as_ref().map_or(0, |path| path.len()).to_string();
    log_event_with_fields(
        Event::EvidenceTraced,
        &[
            ("found", if evidence.is_some() { "true" } else { "false" }),
            ("steps", steps.as_str()),
        ],
    );

    let findings = Findings {
        validation,
        gate_results,
        evidence,
    };
    let determination = assemble(catalog, &closure, &request, findings);
    log_event_with_fields(
        Event::DeterminationAssembled,
        &[
            ("mode", determination.mode().as_str()),
            ("state", determination.state().as_str()),
        ],
    );

    Ok(Outcome {
        closure,
        determination,
    })
}

/// Closes the graph under the catalog's rules.
pub fn close(graph: &Graph, config: &RunConfig, catalog: &Catalog) -> PipelineResult<Closure> {
    let asserted = graph.len().to_string();
    let scope = ObservationScope::with_fields("CLOSURE", &[("asserted", asserted.as_str())]);
    match rules::close(graph, catalog.rules(), config.max_iterations()) {
        Ok(closure) => {
            let stats = closure.stats();
            let closed = stats.closed.to_string();
            let passes = stats.passes.to_string();
            scope.complete_with_fields(&[("closed", closed.as_str()), ("passes", passes.as_str())]);
            Ok(closure)
        }
        Err(err) => {
            if err.code() == EngineErrorCode::ArcoEngineDivergence {
                let iterations = err.iterations().to_string();
                let batch = err.last_batch().len().to_string();
                log_event_with_fields(
                    Event::EngineDivergence,
                    &[("iterations", iterations.as_str()), ("last_batch", batch.as_str())],
                );
            }
            scope.fail(&err);
            Err(PipelineError::from(err))
        }
    }
}

/// Subject and target of the configured run
pub fn request(config: &RunConfig) -> ClassificationRequest {
    ClassificationRequest {
        profile: config.profile().map(|p| p.as_str().to_string()),
        subject: config.subject().clone(),
        target: config.target().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determination::ClassificationState;
    use crate::vocab::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const SCHEMA: &str = "\
<https://arco.ai/ontology/core#BiometricIdentificationCapability> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <https://arco.ai/ontology/core#AnnexIIITriggeringCapability> .
";

    const SYSTEM_FACTS: &str = r#"{
  "prefixes": {"ex": "urn:ex:"},
  "facts": [
    ["ex:s", "rdf:type", "arco:System"],
    ["ex:s", "bfo:0000051", "ex:module"],
    ["ex:module", "ro:0000091", "ex:disposition"],
    ["ex:disposition", "rdf:type", "arco:BiometricIdentificationCapability"]
  ]
}"#;

    #[test]
    fn test_determine_runs_every_stage() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write(&dir, "schema.nt", SCHEMA), write(&dir, "system.json", SYSTEM_FACTS)];
        let config = RunConfig::new(None, sources, "urn:ex:s", "arco:HighRiskSystem", 50).unwrap();
        let catalog = Catalog::annex_iii().unwrap();

        let outcome = determine(&config, &catalog).unwrap();
        let d = outcome.determination();
        assert_eq!(d.triggering_rule(), Some("ARCO-R4"));
        // Undocumented high-risk system
        assert_eq!(d.state(), ClassificationState::Underdetermined);
        assert!(outcome.closure().graph().len() > 5);
    }

    #[test]
    fn test_divergence_is_fatal() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write(&dir, "schema.nt", SCHEMA), write(&dir, "system.json", SYSTEM_FACTS)];
        // Subclass and type inheritance need more than one pass
        let config = RunConfig::new(None, sources, "urn:ex:s", HIGH_RISK_SYSTEM, 1).unwrap();
        let catalog = Catalog::annex_iii().unwrap();

        let err = determine(&config, &catalog).unwrap_err();
        assert_eq!(err.code(), "ARCO_ENGINE_DIVERGENCE");
    }

    #[test]
    fn test_malformed_source_is_load_error() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write(&dir, "bad.nt", "<urn:a> <urn:b>\n")];
        let config = RunConfig::new(None, sources, "urn:a", HIGH_RISK_SYSTEM, 10).unwrap();
        let catalog = Catalog::annex_iii().unwrap();

        let err = determine(&config, &catalog).unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
        assert_eq!(err.code(), "ARCO_LOAD_MALFORMED");
    }
}
