//! Determinations for the shipped profiles

mod common;

use arco::catalog::Catalog;
use arco::config::{Profile, RunConfig, RunOptions};
use arco::determination::{ClassificationMode, ClassificationState, Determination};
use arco::gates::GateOutcome;
use arco::graph::{Fact, Term};
use arco::pipeline;
use arco::vocab::{self, *};

use common::ontology_dir;

fn config(profile: Profile) -> RunConfig {
    RunConfig::resolve(&RunOptions {
        profile: Some(profile),
        data_dir: Some(ontology_dir()),
        ..Default::default()
    })
    .unwrap()
}

fn determination(profile: Profile) -> Determination {
    let catalog = Catalog::annex_iii().unwrap();
    pipeline::determine(&config(profile), &catalog)
        .unwrap()
        .into_determination()
}

#[test]
fn test_sentinel_is_entailed() {
    let d = determination(Profile::Sentinel);

    assert_eq!(d.profile(), Some("sentinel"));
    assert_eq!(d.subject(), &Term::named(vocab::arco("Sentinel_ID_System")));
    assert_eq!(d.state(), ClassificationState::Entailed);
    assert_eq!(d.mode(), ClassificationMode::Inferred);
    assert_eq!(d.triggering_rule(), Some("ARCO-R5"));
    assert_eq!(
        d.triggering_category(),
        Some(&Term::named(vocab::arco("FaceRecognitionCapability")))
    );
    assert!(d.conforms());
    assert!(d.missing_commitments().is_empty());
}

#[test]
fn test_sentinel_evidence_reaches_face_id() {
    let d = determination(Profile::Sentinel);
    let path = d.evidence_path().expect("evidence path");

    assert_eq!(path.len(), 2);
    assert_eq!(
        path.steps[0],
        Fact::named(&vocab::arco("Sentinel_ID_System"), HAS_PART, &vocab::arco("Sentinel_FaceID_Module"))
    );
    assert_eq!(path.terminal(), &Term::named(vocab::arco("Sentinel_FaceID_Disposition")));
}

#[test]
fn test_claude3_is_underdetermined() {
    let d = determination(Profile::Claude3);

    assert_eq!(d.state(), ClassificationState::Underdetermined);
    assert_eq!(d.mode(), ClassificationMode::Absent);
    assert!(d.conforms());
    assert!(d.evidence_path().is_none());
    assert!(d.contradiction().is_none());
    assert!(d
        .gate_results()
        .iter()
        .all(|r| r.outcome == GateOutcome::Fail));

    let missing: Vec<&str> = d
        .missing_commitments()
        .iter()
        .map(|c| c.gate_id.as_str())
        .collect();
    assert_eq!(missing, vec!["GATE-1", "GATE-2", "GATE-3"]);
}

#[test]
fn test_each_profile_targets_annex_iii_1a_by_default() {
    for profile in Profile::ALL {
        let d = determination(profile);
        assert_eq!(d.target_category(), &Term::named(ANNEX_III_1A_SYSTEM));
    }
}

#[test]
fn test_sentinel_ablation_flips_every_gate() {
    let catalog = Catalog::annex_iii().unwrap();
    let report = pipeline::ablate(&config(Profile::Sentinel), &catalog).unwrap();

    assert_eq!(report.baseline, ClassificationState::Entailed);
    assert!(report.failing_gates.is_empty());
    assert_eq!(report.gates.len(), 3);
    assert!(report.all_flipped());
    for gate in &report.gates {
        for trial in &gate.trials {
            assert_eq!(trial.gate_outcome, GateOutcome::Fail);
        }
    }
}

#[test]
fn test_sentinel_high_risk_survives_gate_2_and_3_removal() {
    let catalog = Catalog::annex_iii().unwrap();
    let report = pipeline::ablate(&config(Profile::Sentinel), &catalog).unwrap();

    for gate in &report.gates {
        assert!(!gate.trials.is_empty(), "{} has no asserted witness", gate.gate_id);
        for trial in &gate.trials {
            assert_eq!(trial.holds(ANNEX_III_1A_SYSTEM), Some(false));
            // ARCO-R4 needs only the capability chain
            let high_risk = trial.holds(HIGH_RISK_SYSTEM);
            match gate.gate_id.as_str() {
                "GATE-1" => assert_eq!(high_risk, Some(false)),
                _ => assert_eq!(high_risk, Some(true), "{}", trial.removed.short()),
            }
        }
    }
}

#[test]
fn test_claude3_ablation_has_nothing_to_remove() {
    let catalog = Catalog::annex_iii().unwrap();
    let report = pipeline::ablate(&config(Profile::Claude3), &catalog).unwrap();

    assert_eq!(report.baseline, ClassificationState::Underdetermined);
    assert_eq!(report.failing_gates, vec!["GATE-1", "GATE-2", "GATE-3"]);
}

#[test]
fn test_sentinel_proof_view() {
    let catalog = Catalog::annex_iii().unwrap();
    let config = config(Profile::Sentinel);
    let graph = pipeline::load(&config).unwrap();
    let closure = pipeline::close(&graph, &config, &catalog).unwrap();
    let view = pipeline::proof_view(&closure, config.subject(), config.target());

    assert!(view.classified);
    assert!(!view.subject_relations.is_empty());
    assert!(view
        .subject_relations
        .iter()
        .all(|f| f.fact.subject == *config.subject() || f.fact.object == *config.subject()));
    assert!(pipeline::render_proof_view(&view).contains("Sentinel_ID_System"));
}
