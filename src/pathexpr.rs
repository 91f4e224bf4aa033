//! Dotted path expressions
//!
//! Parses paths like `definitions.*.definition` into typed segments using a
//! pest grammar. A `*` segment fans out over every element of a sequence; a
//! numeric segment indexes one element; anything else is a mapping key.

use crate::record::Node;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "path.pest"]
struct PathParser;

/// One step of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
    /// Every element of a sequence
    Wildcard,
}

#[derive(Debug, Error)]
#[error("invalid path expression {raw:?}: {message}")]
pub struct PathError {
    pub raw: String,
    pub message: String,
}

/// A parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    raw: String,
    segments: Vec<Segment>,
}

impl PathExpr {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let invalid = |message: String| PathError {
            raw: input.to_string(),
            message,
        };

        let mut pairs = PathParser::parse(Rule::path, input)
            .map_err(|e| invalid(e.to_string()))?;
        let path_pair = pairs
            .next()
            .ok_or_else(|| invalid("empty path".to_string()))?;

        let mut segments = Vec::new();
        for pair in path_pair.into_inner() {
            if pair.as_rule() != Rule::segment {
                continue; // EOI
            }
            let text = pair.as_str();
            let segment = if text == "*" {
                Segment::Wildcard
            } else if text.bytes().all(|b| b.is_ascii_digit()) {
                let index = text
                    .parse::<usize>()
                    .map_err(|_| invalid(format!("index out of range: {}", text)))?;
                Segment::Index(index)
            } else if text.contains('*') {
                return Err(invalid(format!(
                    "wildcard must be a whole segment, found {:?}",
                    text
                )));
            } else {
                Segment::Key(text.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolve the path against a record tree, returning every node it
    /// reaches. Mismatched shapes (a key into a sequence, a wildcard over a
    /// mapping) resolve to nothing rather than erroring.
    pub fn resolve<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        let mut current = vec![root];
        for segment in &self.segments {
            let mut next = Vec::new();
            for node in current {
                match (segment, node) {
                    (Segment::Key(key), Node::Mapping(_)) => {
                        if let Some(child) = node.get(key) {
                            next.push(child);
                        }
                    }
                    (Segment::Index(index), Node::Sequence(items)) => {
                        if let Some(child) = items.get(*index) {
                            next.push(child);
                        }
                    }
                    (Segment::Wildcard, Node::Sequence(items)) => {
                        next.extend(items.iter());
                    }
                    _ => {}
                }
            }
            current = next;
        }
        current
    }
}

impl std::fmt::Display for PathExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments() {
        let path = PathExpr::parse("definitions.*.definition").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("definitions".to_string()),
                Segment::Wildcard,
                Segment::Key("definition".to_string()),
            ]
        );

        let path = PathExpr::parse("a.0.b").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("a".to_string()),
                Segment::Index(0),
                Segment::Key("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PathExpr::parse("").is_err());
        assert!(PathExpr::parse("a..b").is_err());
        assert!(PathExpr::parse(".a").is_err());
        assert!(PathExpr::parse("a.").is_err());
        assert!(PathExpr::parse("def*n").is_err());
        assert!(PathExpr::parse("a b").is_err());
    }

    #[test]
    fn test_resolve_wildcard() {
        let node = Node::from_json(json!({
            "definitions": [
                {"definition": "one"},
                {"definition": "two"},
                {"other": "three"},
            ],
        }));

        let path = PathExpr::parse("definitions.*.definition").unwrap();
        let values: Vec<_> = path
            .resolve(&node)
            .into_iter()
            .filter_map(Node::as_str)
            .collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn test_resolve_index_and_mismatch() {
        let node = Node::from_json(json!({"items": ["a", "b"]}));

        let first = PathExpr::parse("items.1").unwrap();
        assert_eq!(first.resolve(&node)[0].as_str(), Some("b"));

        // Wildcard over a mapping resolves to nothing
        let bad = PathExpr::parse("*.items").unwrap();
        assert!(bad.resolve(&node).is_empty());

        let missing = PathExpr::parse("items.5").unwrap();
        assert!(missing.resolve(&node).is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let path = PathExpr::parse("a.*.b").unwrap();
        assert_eq!(path.to_string(), "a.*.b");
    }
}
