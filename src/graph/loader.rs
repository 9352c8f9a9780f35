//! Fact source loader
//!
//! Reads each declared source, parses it according to its extension and
//! merges the results into one graph.
//!
//! - `.nt`: N-Triples
//! - `.json`: `{"prefixes": {..}, "facts": [[s, r, o], ..]}`
//!
//! Anonymous-node labels are scoped per source (`<index>.<label>`) so two
//! sources that both say `_:b0` never share a node. Any failure is a fatal
//! LoadError; an empty but well-formed source is fine.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::{LoadError, LoadResult};
use super::fact::Fact;
use super::ntriples;
use super::store::Graph;
use super::term::Term;
use crate::observability::{log_event_with_fields, Event};
use crate::vocab;

/// Input syntax of a fact source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceFormat {
    /// Line-based N-Triples
    NTriples,
    /// JSON fact document
    Json,
}

impl SourceFormat {
    /// Selects a format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "nt" => Some(SourceFormat::NTriples),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }

    /// Returns the format name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::NTriples => "ntriples",
            SourceFormat::Json => "json",
        }
    }
}

/// One path-addressed input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FactSource {
    /// Resolves the format of `path` from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> LoadResult<Self> {
        let path = path.into();
        let format = SourceFormat::from_path(&path)
            .ok_or_else(|| LoadError::unsupported_format(path.display().to_string()))?;
        Ok(Self { path, format })
    }

    /// Returns the source path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the source format
    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

/// Loads and merges all sources, in order.
pub fn load(sources: &[FactSource]) -> LoadResult<Graph> {
    let mut graph = Graph::new();
    for (index, source) in sources.iter().enumerate() {
        let origin = source.path.display().to_string();
        let text = fs::read_to_string(&source.path)
            .map_err(|e| LoadError::unreadable(&origin, format!("Failed to read source: {}", e)))?;

        let facts = parse_source(&origin, source.format, &text)?;
        let count = facts.len().to_string();
        for fact in facts {
            graph.insert(scope_anonymous(fact, index));
        }

        log_event_with_fields(
            Event::SourceLoaded,
            &[
                ("path", origin.as_str()),
                ("format", source.format.as_str()),
                ("facts", count.as_str()),
            ],
        );
    }
    Ok(graph)
}

/// Parses source text in the given format.
pub fn parse_source(origin: &str, format: SourceFormat, text: &str) -> LoadResult<Vec<Fact>> {
    match format {
        SourceFormat::NTriples => ntriples::parse(origin, text),
        SourceFormat::Json => parse_json(origin, text),
    }
}

fn scope_anonymous(fact: Fact, index: usize) -> Fact {
    let scope = |term: Term| match term {
        Term::Anonymous(label) => Term::Anonymous(format!("{}.{}", index, label)),
        other => other,
    };
    Fact::new(scope(fact.subject), fact.relation, scope(fact.object))
}

// ==================
// JSON fact documents
// ==================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FactDocument {
    #[serde(default)]
    prefixes: BTreeMap<String, String>,
    #[serde(default)]
    facts: Vec<[JsonTerm; 3]>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTerm {
    Text(String),
    Literal(JsonLiteral),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonLiteral {
    value: String,
    #[serde(default)]
    datatype: Option<String>,
}

/// Parses a JSON fact document.
pub fn parse_json(origin: &str, text: &str) -> LoadResult<Vec<Fact>> {
    let document: FactDocument = serde_json::from_str(text)
        .map_err(|e| LoadError::malformed(origin, e.line(), e.to_string()))?;

    let resolver = PrefixResolver::new(origin, &document.prefixes);
    let mut facts = Vec::with_capacity(document.facts.len());

    for (index, [subject, relation, object]) in document.facts.iter().enumerate() {
        let at = |reason: String| {
            LoadError::malformed_document(origin, format!("facts[{}]: {}", index, reason))
        };

        let subject = resolver.term(subject)?;
        if subject.is_literal() {
            return Err(at("subject must be a named entity or anonymous node".to_string()));
        }
        let relation = resolver.term(relation)?;
        if !relation.is_named() {
            return Err(at("relation must be a named entity".to_string()));
        }
        let object = resolver.term(object)?;

        facts.push(Fact::new(subject, relation, object));
    }
    Ok(facts)
}

/// Resolves JSON term strings against declared and built-in prefixes.
/// Declared prefixes shadow built-in ones.
struct PrefixResolver<'a> {
    origin: &'a str,
    declared: &'a BTreeMap<String, String>,
}

impl<'a> PrefixResolver<'a> {
    fn new(origin: &'a str, declared: &'a BTreeMap<String, String>) -> Self {
        Self { origin, declared }
    }

    fn term(&self, term: &JsonTerm) -> LoadResult<Term> {
        match term {
            JsonTerm::Literal(literal) => {
                let datatype = match &literal.datatype {
                    Some(dt) => self.iri(dt)?,
                    None => vocab::XSD_STRING.to_string(),
                };
                Ok(Term::literal(literal.value.clone(), datatype))
            }
            JsonTerm::Text(text) => match text.strip_prefix("_:") {
                Some(label) if !label.is_empty() => Ok(Term::anonymous(label)),
                Some(_) => Err(LoadError::malformed_document(
                    self.origin,
                    "anonymous node has an empty label",
                )),
                None => self.iri(text).map(Term::named),
            },
        }
    }

    /// `<iri>`, absolute IRI (`scheme://...` or `urn:...`), or `prefix:local`.
    fn iri(&self, text: &str) -> LoadResult<String> {
        let iri = self.expand(text)?;
        ntriples::validate_iri(&iri)
            .map_err(|reason| LoadError::malformed_document(self.origin, reason))?;
        Ok(iri)
    }

    fn expand(&self, text: &str) -> LoadResult<String> {
        if let Some(inner) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Ok(inner.to_string());
        }
        if text.contains("://") || text.starts_with("urn:") {
            return Ok(text.to_string());
        }
        let (prefix, local) = text.split_once(':').ok_or_else(|| {
            LoadError::malformed_document(
                self.origin,
                format!("'{}' is neither an IRI nor a prefixed name", text),
            )
        })?;
        if let Some(ns) = self.declared.get(prefix) {
            return Ok(format!("{}{}", ns, local));
        }
        vocab::expand_curie(text).ok_or_else(|| LoadError::unknown_prefix(self.origin, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::errors::LoadErrorCode;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/core.nt")),
            Some(SourceFormat::NTriples)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a/inst.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_path(Path::new("a/core.ttl")), None);

        let err = FactSource::from_path("core.ttl").unwrap_err();
        assert_eq!(err.code(), LoadErrorCode::ArcoLoadUnsupportedFormat);
    }

    #[test]
    fn test_json_document_terms() {
        let doc = r#"{
            "prefixes": {"ex": "urn:ex:"},
            "facts": [
                ["ex:s", "rdf:type", "arco:System"],
                ["<urn:a>", "urn:p", {"value": "7", "datatype": "xsd:integer"}],
                ["_:n", "http://example.org/p", {"value": "text"}]
            ]
        }"#;
        let facts = parse_json("doc.json", doc).unwrap();
        assert_eq!(
            facts[0],
            Fact::named("urn:ex:s", vocab::RDF_TYPE, vocab::SYSTEM)
        );
        assert_eq!(facts[1].object, Term::integer(7));
        assert_eq!(facts[2].subject, Term::anonymous("n"));
        assert_eq!(facts[2].object, Term::string("text"));
    }

    #[test]
    fn test_json_unknown_prefix() {
        let doc = r#"{"facts": [["nope:s", "rdf:type", "arco:System"]]}"#;
        let err = parse_json("doc.json", doc).unwrap_err();
        assert_eq!(err.code(), LoadErrorCode::ArcoLoadUnknownPrefix);
    }

    #[test]
    fn test_json_rejects_unknown_fields_and_literal_subjects() {
        let err = parse_json("doc.json", r#"{"triples": []}"#).unwrap_err();
        assert_eq!(err.code(), LoadErrorCode::ArcoLoadMalformed);

        let doc = r#"{"facts": [[{"value": "x"}, "rdf:type", "arco:System"]]}"#;
        let err = parse_json("doc.json", doc).unwrap_err();
        assert_eq!(err.code(), LoadErrorCode::ArcoLoadMalformed);
    }

    #[test]
    fn test_load_merges_and_deduplicates() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.nt", "<urn:s> <urn:p> <urn:o> .\n");
        let b = write_file(
            &dir,
            "b.json",
            r#"{"facts": [["urn:s", "urn:p", "urn:o"], ["urn:s", "urn:p", "urn:o2"]]}"#,
        );
        let sources = [
            FactSource::from_path(a).unwrap(),
            FactSource::from_path(b).unwrap(),
        ];
        let graph = load(&sources).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_anonymous_nodes_scoped_per_source() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.nt", "_:b0 <urn:p> <urn:o> .\n");
        let b = write_file(&dir, "b.nt", "_:b0 <urn:p> <urn:o> .\n");
        let sources = [
            FactSource::from_path(a).unwrap(),
            FactSource::from_path(b).unwrap(),
        ];
        let graph = load(&sources).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&Fact::new(
            Term::anonymous("0.b0"),
            Term::named("urn:p"),
            Term::named("urn:o")
        )));
    }

    #[test]
    fn test_missing_source_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let source = FactSource::from_path(dir.path().join("absent.nt")).unwrap();
        let err = load(&[source]).unwrap_err();
        assert_eq!(err.code(), LoadErrorCode::ArcoLoadUnreadable);
    }
}
