//! Annex III 1(a) catalog: remote biometric identification systems

use crate::gates::Gate;
use crate::graph::pattern;
use crate::rules::{Rule, TracePlan};
use crate::shapes::{LinkConstraint, Shape};
use crate::vocab::*;

pub const R_SUBCLASS: &str = "ARCO-R1";
pub const R_TYPE_INHERITANCE: &str = "ARCO-R2";
pub const R_PART_TRANSITIVE: &str = "ARCO-R3";
pub const R_HIGH_RISK: &str = "ARCO-R4";
pub const R_ANNEX_III_1A: &str = "ARCO-R5";
pub const R_EXCLUSION: &str = "ARCO-R6";

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            R_SUBCLASS,
            "subclass transitivity",
            vec![
                pattern("?a", RDFS_SUBCLASS_OF, "?b"),
                pattern("?b", RDFS_SUBCLASS_OF, "?c"),
            ],
            pattern("?a", RDFS_SUBCLASS_OF, "?c"),
        ),
        Rule::new(
            R_TYPE_INHERITANCE,
            "type inheritance",
            vec![
                pattern("?x", RDF_TYPE, "?c"),
                pattern("?c", RDFS_SUBCLASS_OF, "?d"),
            ],
            pattern("?x", RDF_TYPE, "?d"),
        ),
        Rule::new(
            R_PART_TRANSITIVE,
            "has-part transitivity",
            vec![pattern("?a", HAS_PART, "?b"), pattern("?b", HAS_PART, "?c")],
            pattern("?a", HAS_PART, "?c"),
        ),
        Rule::new(
            R_HIGH_RISK,
            "high-risk capability bridge",
            vec![
                pattern("?s", RDF_TYPE, SYSTEM),
                pattern("?s", HAS_PART, "?c"),
                pattern("?c", HAS_DISPOSITION, "?d"),
                pattern("?d", RDF_TYPE, ANNEX_III_TRIGGERING_CAPABILITY),
            ],
            pattern("?s", RDF_TYPE, HIGH_RISK_SYSTEM),
        )
        .blocked_by(pattern("?s", EXCLUDED_FROM, HIGH_RISK_SYSTEM))
        .traced(TracePlan::new(
            &[HAS_PART, HAS_DISPOSITION],
            ANNEX_III_TRIGGERING_CAPABILITY,
        )),
        Rule::new(
            R_ANNEX_III_1A,
            "Annex III 1(a) remote biometric identification",
            vec![
                pattern("?s", RDF_TYPE, SYSTEM),
                pattern("?s", HAS_PART, "?c"),
                pattern("?c", HAS_DISPOSITION, "?d"),
                pattern("?d", RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
                pattern("?iu", RDF_TYPE, INTENDED_USE_SPECIFICATION),
                pattern("?iu", IS_ABOUT, "?s"),
                pattern("?iu", PRESCRIBES, "?p"),
                pattern("?p", RDF_TYPE, REMOTE_BIOMETRIC_IDENTIFICATION_PROCESS),
                pattern("?us", RDF_TYPE, USE_SCENARIO),
                pattern("?us", IS_ABOUT, "?s"),
            ],
            pattern("?s", RDF_TYPE, ANNEX_III_1A_SYSTEM),
        )
        .blocked_by(pattern("?s", EXCLUDED_FROM, ANNEX_III_1A_SYSTEM))
        .traced(TracePlan::new(
            &[HAS_PART, HAS_DISPOSITION],
            BIOMETRIC_IDENTIFICATION_CAPABILITY,
        )),
        Rule::new(
            R_EXCLUSION,
            "explicit exclusion",
            vec![pattern("?s", EXCLUDED_FROM, "?c")],
            pattern("?s", NOT_APPLICABLE_TO, "?c"),
        ),
    ]
}

pub fn shapes() -> Vec<Shape> {
    vec![
        Shape::new("ARCO-S1", HIGH_RISK_SYSTEM).require(LinkConstraint::new(
            "documentation",
            DOCUMENTED_BY,
            ASSESSMENT_DOCUMENTATION,
            1,
            "a high-risk system must be documented by a conformity assessment",
        )),
        Shape::new("ARCO-S2", ASSESSMENT_DOCUMENTATION).require(LinkConstraint::new(
            "subject",
            IS_ABOUT,
            SYSTEM,
            1,
            "assessment documentation must be about a system",
        )),
        Shape::new("ARCO-S3", INTENDED_USE_SPECIFICATION).require(LinkConstraint::new(
            "prescribed-process",
            PRESCRIBES,
            PROCESS,
            1,
            "an intended-use specification must prescribe a process",
        )),
    ]
}

pub fn gates() -> Vec<Gate> {
    vec![
        Gate::new(
            "GATE-1",
            "capability",
            "Evidence that a component of the system bears a biometric identification capability",
        )
        .and(
            pattern("?system", HAS_PART, "?component"),
            "the system has a component",
        )
        .and(
            pattern("?component", HAS_DISPOSITION, "?disposition"),
            "that component bears a disposition",
        )
        .and(
            pattern("?disposition", RDF_TYPE, BIOMETRIC_IDENTIFICATION_CAPABILITY),
            "that disposition is a biometric identification capability",
        ),
        Gate::new(
            "GATE-2",
            "intended-use",
            "An intended-use specification about the system that prescribes remote biometric identification",
        )
        .and(
            pattern("?intended_use", RDF_TYPE, INTENDED_USE_SPECIFICATION),
            "an intended-use specification exists",
        )
        .and(
            pattern("?intended_use", IS_ABOUT, "?system"),
            "the intended-use specification is about the system",
        )
        .and(
            pattern("?intended_use", PRESCRIBES, "?process"),
            "the intended-use specification prescribes a process",
        )
        .and(
            pattern("?process", RDF_TYPE, REMOTE_BIOMETRIC_IDENTIFICATION_PROCESS),
            "the prescribed process is remote biometric identification",
        ),
        Gate::new(
            "GATE-3",
            "use-scenario",
            "A documented use scenario about the system",
        )
        .and(
            pattern("?scenario", RDF_TYPE, USE_SCENARIO),
            "a use scenario exists",
        )
        .and(
            pattern("?scenario", IS_ABOUT, "?system"),
            "the use scenario is about the system",
        ),
    ]
}
