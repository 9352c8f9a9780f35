//! Fixed identifiers used by the rule, shape and gate catalog
//!
//! All identifiers are absolute IRIs. Prefixes exist only for input
//! convenience (CURIE expansion) and for compact display.

/// Builds an ARCO core IRI from a local name at compile time.
macro_rules! arco_iri {
    ($local:literal) => {
        concat!("https://arco.ai/ontology/core#", $local)
    };
}

pub const ARCO_NS: &str = "https://arco.ai/ontology/core#";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const BFO_NS: &str = "http://purl.obolibrary.org/obo/BFO_";
pub const RO_NS: &str = "http://purl.obolibrary.org/obo/RO_";
pub const IAO_NS: &str = "http://purl.obolibrary.org/obo/IAO_";
pub const CCO_NS: &str = "http://www.ontologyrepository.com/CommonCoreOntologies/";

/// Built-in prefixes in display order. No namespace is a prefix of
/// another, so at most one entry matches any IRI.
pub const PREFIXES: &[(&str, &str)] = &[
    ("cco", CCO_NS),
    ("rdfs", RDFS_NS),
    ("rdf", RDF_NS),
    ("xsd", XSD_NS),
    ("arco", ARCO_NS),
    ("bfo", BFO_NS),
    ("iao", IAO_NS),
    ("ro", RO_NS),
];

// Structural relations
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const HAS_PART: &str = "http://purl.obolibrary.org/obo/BFO_0000051";
pub const HAS_DISPOSITION: &str = "http://purl.obolibrary.org/obo/RO_0000091";
pub const HAS_PARTICIPANT: &str = "http://purl.obolibrary.org/obo/RO_0000057";
pub const IS_ABOUT: &str = "http://purl.obolibrary.org/obo/IAO_0000136";
pub const PRESCRIBES: &str = "http://www.ontologyrepository.com/CommonCoreOntologies/prescribes";
pub const HAS_OUTPUT: &str = "http://www.ontologyrepository.com/CommonCoreOntologies/has_output";
pub const DOCUMENTED_BY: &str = arco_iri!("documentedBy");
pub const EXCLUDED_FROM: &str = arco_iri!("excludedFrom");
pub const NOT_APPLICABLE_TO: &str = arco_iri!("notApplicableTo");

// Datatypes
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

// Categories
pub const SYSTEM: &str = arco_iri!("System");
pub const HIGH_RISK_SYSTEM: &str = arco_iri!("HighRiskSystem");
pub const ANNEX_III_1A_SYSTEM: &str = arco_iri!("AnnexIII1aApplicableSystem");
pub const ANNEX_III_TRIGGERING_CAPABILITY: &str = arco_iri!("AnnexIIITriggeringCapability");
pub const BIOMETRIC_IDENTIFICATION_CAPABILITY: &str =
    arco_iri!("BiometricIdentificationCapability");
pub const INTENDED_USE_SPECIFICATION: &str = arco_iri!("IntendedUseSpecification");
pub const USE_SCENARIO: &str = arco_iri!("UseScenario");
pub const REMOTE_BIOMETRIC_IDENTIFICATION_PROCESS: &str =
    arco_iri!("RemoteBiometricIdentificationProcess");
pub const PROCESS: &str = arco_iri!("Process");
pub const ASSESSMENT_DOCUMENTATION: &str = arco_iri!("AssessmentDocumentation");

// Determination restatement vocabulary
pub const DETERMINATION: &str = arco_iri!("Determination");
pub const GATE_RESULT: &str = arco_iri!("GateResult");
pub const EVIDENCE_STEP: &str = arco_iri!("EvidenceStep");
pub const CONSTRAINT_VIOLATION: &str = arco_iri!("ConstraintViolation");
pub const DETERMINATION_SUBJECT: &str = arco_iri!("determinationSubject");
pub const TARGET_CATEGORY: &str = arco_iri!("targetCategory");
pub const CLASSIFICATION_STATE: &str = arco_iri!("classificationState");
pub const CLASSIFICATION_MODE: &str = arco_iri!("classificationMode");
pub const TRIGGERING_CATEGORY: &str = arco_iri!("triggeringCategory");
pub const TRIGGERING_RULE: &str = arco_iri!("triggeringRule");
pub const HAS_GATE_RESULT: &str = arco_iri!("hasGateResult");
pub const GATE_ID: &str = arco_iri!("gateId");
pub const GATE_OUTCOME: &str = arco_iri!("gateOutcome");
pub const HAS_EVIDENCE_STEP: &str = arco_iri!("hasEvidenceStep");
pub const STEP_INDEX: &str = arco_iri!("stepIndex");
pub const STEP_SUBJECT: &str = arco_iri!("stepSubject");
pub const STEP_RELATION: &str = arco_iri!("stepRelation");
pub const STEP_OBJECT: &str = arco_iri!("stepObject");
pub const MISSING_COMMITMENT: &str = arco_iri!("missingCommitment");
pub const HAS_CONSTRAINT_VIOLATION: &str = arco_iri!("hasConstraintViolation");
pub const VIOLATION_INDEX: &str = arco_iri!("violationIndex");
pub const VIOLATION_SHAPE: &str = arco_iri!("violationShape");
pub const VIOLATION_CONSTRAINT: &str = arco_iri!("violationConstraint");
pub const VIOLATION_FOCUS: &str = arco_iri!("violationFocus");
pub const VIOLATION_MESSAGE: &str = arco_iri!("violationMessage");
pub const CONFORMS: &str = arco_iri!("conforms");
pub const RECORD_CHECKSUM: &str = arco_iri!("recordChecksum");

/// Relations shown in the relation-first proof view.
pub const STRUCTURAL_RELATIONS: &[&str] = &[
    HAS_DISPOSITION,
    HAS_PARTICIPANT,
    PRESCRIBES,
    HAS_OUTPUT,
    IS_ABOUT,
    HAS_PART,
];

/// Expands `prefix:local` over the built-in prefixes.
pub fn expand_curie(curie: &str) -> Option<String> {
    let (prefix, local) = curie.split_once(':')?;
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, ns)| format!("{}{}", ns, local))
}

/// Compacts an IRI to `prefix:local` when a built-in prefix matches.
pub fn compact(iri: &str) -> String {
    for (prefix, ns) in PREFIXES {
        if let Some(local) = iri.strip_prefix(ns) {
            if !local.is_empty() {
                return format!("{}:{}", prefix, local);
            }
        }
    }
    format!("<{}>", iri)
}

/// Local name of an IRI: the part after the last `#`, else after the last `/`.
pub fn local_name(iri: &str) -> &str {
    if let Some((_, local)) = iri.rsplit_once('#') {
        return local;
    }
    iri.rsplit_once('/').map(|(_, local)| local).unwrap_or(iri)
}

/// Human label for well-known relations, else the local name.
pub fn label(iri: &str) -> &str {
    match iri {
        RDF_TYPE => "type",
        RDFS_SUBCLASS_OF => "subClassOf",
        HAS_PART => "has_part",
        HAS_DISPOSITION => "has_disposition",
        HAS_PARTICIPANT => "has_participant",
        IS_ABOUT => "is_about",
        PRESCRIBES => "prescribes",
        HAS_OUTPUT => "has_output",
        _ => local_name(iri),
    }
}

/// ARCO core IRI for a local name known only at run time.
pub fn arco(local: &str) -> String {
    format!("{}{}", ARCO_NS, local)
}

/// Returns true if the IRI lives in the ARCO core namespace.
pub fn is_arco(iri: &str) -> bool {
    iri.starts_with(ARCO_NS)
}
