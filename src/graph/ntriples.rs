//! N-Triples codec
//!
//! Accepted per line:
//! - `<iri>` for named entities
//! - `_:label` for anonymous nodes (subject and object only)
//! - `"value"` and `"value"^^<datatype>` for literals (object only)
//! - `#` comment lines and blank lines
//!
//! Language-tagged literals are rejected. The writer emits one fact per
//! line in canonical order, so its output is byte-stable.

use super::errors::{LoadError, LoadResult};
use super::fact::Fact;
use super::store::Graph;
use super::term::Term;
use crate::vocab;

/// Parses an N-Triples document. `origin` is used only for diagnostics.
pub fn parse(origin: &str, input: &str) -> LoadResult<Vec<Fact>> {
    let mut facts = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fact = LineParser::new(trimmed)
            .parse_fact()
            .map_err(|reason| LoadError::malformed(origin, number, reason))?;
        facts.push(fact);
    }
    Ok(facts)
}

/// Serializes a graph as N-Triples in canonical order.
pub fn write(graph: &Graph) -> String {
    write_facts(graph.iter())
}

/// Serializes facts as N-Triples, sorted and de-duplicated.
pub fn write_facts<'a, I: IntoIterator<Item = &'a Fact>>(facts: I) -> String {
    let mut lines: Vec<String> = facts.into_iter().map(Fact::canonical).collect();
    lines.sort();
    lines.dedup();
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Cursor over a single line
struct LineParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LineParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn parse_fact(mut self) -> Result<Fact, String> {
        self.skip_whitespace();
        let subject = self.parse_term()?;
        if subject.is_literal() {
            return Err("subject must be a named entity or anonymous node".to_string());
        }

        self.skip_whitespace();
        let relation = self.parse_term()?;
        if !relation.is_named() {
            return Err("relation must be a named entity".to_string());
        }

        self.skip_whitespace();
        let object = self.parse_term()?;

        self.skip_whitespace();
        if self.peek() != Some('.') {
            return Err("expected '.' after object".to_string());
        }
        self.pos += 1;
        self.skip_whitespace();
        match self.peek() {
            None | Some('#') => Ok(Fact::new(subject, relation, object)),
            Some(c) => Err(format!("unexpected '{}' after '.'", c)),
        }
    }

    fn parse_term(&mut self) -> Result<Term, String> {
        match self.peek() {
            Some('<') => self.parse_iri().map(Term::named),
            Some('_') => self.parse_anonymous(),
            Some('"') => self.parse_literal(),
            Some(c) => Err(format!("unexpected '{}' where a term was expected", c)),
            None => Err("unexpected end of line".to_string()),
        }
    }

    fn parse_iri(&mut self) -> Result<String, String> {
        // Caller has checked the opening '<'
        self.pos += 1;
        let rest = self.rest();
        let end = rest
            .find('>')
            .ok_or_else(|| "unterminated IRI".to_string())?;
        let iri = &rest[..end];
        validate_iri(iri)?;
        self.pos += end + 1;
        Ok(iri.to_string())
    }

    fn parse_anonymous(&mut self) -> Result<Term, String> {
        let rest = self.rest();
        let label_part = rest
            .strip_prefix("_:")
            .ok_or_else(|| "anonymous node must start with '_:'".to_string())?;
        let end = label_part
            .find(char::is_whitespace)
            .unwrap_or(label_part.len());
        // '.' may appear inside a label but never last
        let label = label_part[..end].trim_end_matches('.');
        let len = label.len();
        if label.is_empty() {
            return Err("anonymous node has an empty label".to_string());
        }
        if !label
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(format!("invalid anonymous node label '{}'", label));
        }
        self.pos += 2 + len;
        Ok(Term::anonymous(label))
    }

    fn parse_literal(&mut self) -> Result<Term, String> {
        // Caller has checked the opening '"'
        self.pos += 1;
        let mut value = String::new();
        let mut chars = self.rest().char_indices();
        let mut closed_at = None;

        while let Some((offset, c)) = chars.next() {
            match c {
                '"' => {
                    closed_at = Some(offset);
                    break;
                }
                '\\' => {
                    let (_, escaped) = chars
                        .next()
                        .ok_or_else(|| "dangling escape in literal".to_string())?;
                    value.push(match escaped {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => return Err(format!("unsupported escape '\\{}'", other)),
                    });
                }
                c => value.push(c),
            }
        }

        let closed_at = closed_at.ok_or_else(|| "unterminated literal".to_string())?;
        self.pos += closed_at + 1;

        if self.rest().starts_with('@') {
            return Err("language-tagged literals are not supported".to_string());
        }
        if self.rest().starts_with("^^") {
            self.pos += 2;
            if self.peek() != Some('<') {
                return Err("datatype must be an IRI".to_string());
            }
            let datatype = self.parse_iri()?;
            return Ok(Term::literal(value, datatype));
        }
        Ok(Term::literal(value, vocab::XSD_STRING))
    }
}

/// Rejects IRIs that cannot be written back unambiguously.
pub(crate) fn validate_iri(iri: &str) -> Result<(), String> {
    if iri.is_empty() {
        return Err("empty IRI".to_string());
    }
    if let Some(c) = iri
        .chars()
        .find(|c| matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '`') || c.is_whitespace())
    {
        return Err(format!("invalid character {:?} in IRI", c));
    }
    if !iri.contains(':') {
        return Err(format!("IRI '{}' is not absolute", iri));
    }
    Ok(())
}
