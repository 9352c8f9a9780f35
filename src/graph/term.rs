//! Term model
//!
//! A term is a named entity (absolute IRI), a typed literal, or an
//! anonymous node. Equality is structural. Ordering follows the canonical
//! N-Triples-shaped form of the term, so every collection of terms iterates
//! in the same order on every host.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::vocab;

/// A graph term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Named entity identified by an absolute IRI
    Named(String),
    /// Literal value with its datatype IRI
    Literal {
        /// Lexical value
        value: String,
        /// Datatype IRI
        datatype: String,
    },
    /// Anonymous node with a source-scoped label
    Anonymous(String),
}

impl Term {
    /// Create a named entity
    pub fn named(iri: impl Into<String>) -> Self {
        Term::Named(iri.into())
    }

    /// Create a typed literal
    pub fn literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// Create an `xsd:string` literal
    pub fn string(value: impl Into<String>) -> Self {
        Term::literal(value, vocab::XSD_STRING)
    }

    /// Create an `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Term::literal(value.to_string(), vocab::XSD_INTEGER)
    }

    /// Create an anonymous node
    pub fn anonymous(label: impl Into<String>) -> Self {
        Term::Anonymous(label.into())
    }

    /// Returns true for named entities
    pub fn is_named(&self) -> bool {
        matches!(self, Term::Named(_))
    }

    /// Returns true for literals
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Returns the IRI of a named entity
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Named(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true if this term is the named entity `iri`
    pub fn is_iri(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }

    /// Canonical N-Triples form, with literal escaping applied.
    pub fn canonical(&self) -> String {
        match self {
            Term::Named(iri) => format!("<{}>", iri),
            Term::Literal { value, datatype } => {
                let mut out = String::with_capacity(value.len() + datatype.len() + 8);
                out.push('"');
                escape_literal(&mut out, value);
                out.push_str("\"^^<");
                out.push_str(datatype);
                out.push('>');
                out
            }
            Term::Anonymous(label) => format!("_:{}", label),
        }
    }

    /// Compact display form: `prefix:local` for known namespaces,
    /// the lexical value for literals.
    pub fn compact(&self) -> String {
        match self {
            Term::Named(iri) => vocab::compact(iri),
            Term::Literal { value, .. } => format!("\"{}\"", value),
            Term::Anonymous(label) => format!("_:{}", label),
        }
    }

    /// Short display form: local name of an IRI, the lexical value of a literal.
    pub fn short(&self) -> &str {
        match self {
            Term::Named(iri) => vocab::local_name(iri),
            Term::Literal { value, .. } => value,
            Term::Anonymous(label) => label,
        }
    }

    /// The pieces of the canonical form, in order. Only the literal value
    /// (second piece of a literal) is escaped when compared.
    fn ordering_parts(&self) -> [&str; 5] {
        match self {
            Term::Named(iri) => ["<", iri, ">", "", ""],
            Term::Literal { value, datatype } => ["\"", value, "\"^^<", datatype, ">"],
            Term::Anonymous(label) => ["_:", label, "", "", ""],
        }
    }

    /// Bytes of `canonical()` without building the string.
    fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let escape_value = matches!(self, Term::Literal { .. });
        self.ordering_parts()
            .into_iter()
            .enumerate()
            .flat_map(move |(index, part)| {
                let escaped = escape_value && index == 1;
                part.chars().flat_map(move |c| canonical_char(c, escaped))
            })
    }
}

/// UTF-8 bytes of one character as it appears in the canonical form.
fn canonical_char(c: char, escaped: bool) -> impl Iterator<Item = u8> {
    let mut buf = [0u8; 4];
    let len = match (escaped, c) {
        (true, '"') => put(&mut buf, b"\\\""),
        (true, '\\') => put(&mut buf, b"\\\\"),
        (true, '\n') => put(&mut buf, b"\\n"),
        (true, '\r') => put(&mut buf, b"\\r"),
        (true, '\t') => put(&mut buf, b"\\t"),
        _ => c.encode_utf8(&mut buf).len(),
    };
    buf.into_iter().take(len)
}

fn put(buf: &mut [u8; 4], bytes: &[u8]) -> usize {
    buf[..bytes.len()].copy_from_slice(bytes);
    bytes.len()
}

impl Ord for Term {
    /// Byte order of the canonical forms. Canonical terms are prefix-free
    /// up to the separating space, so ordering facts position by position
    /// agrees with ordering their N-Triples lines.
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(other.canonical_bytes())
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for part in self.ordering_parts() {
            state.write(part.as_bytes());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for Term {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

/// Escape a literal value for the canonical form.
pub(crate) fn escape_literal(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}
