//! Record tree data structures
//!
//! A record is a schema-validated metadata document represented as a
//! polymorphic tree: mappings with string keys, ordered sequences, and
//! scalar leaves. Validation and deserialization happen upstream; by the
//! time a record reaches the miner it is immutable except for explicit
//! phrase stripping.

use serde_json::Value;

/// A scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Render the scalar as display text (used for grouping and matching)
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => "null".to_string(),
        }
    }

    /// True for values treated as absent: null, empty string, literal "null"
    pub fn is_null_like(&self) -> bool {
        matches!(self, Scalar::Null)
            || matches!(self, Scalar::Str(s) if s.is_empty() || s == "null")
    }
}

/// A node in a record tree
///
/// The closed set of shapes means traversal can match exhaustively; there is
/// no "unknown node kind" case to mishandle.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Key/value pairs in document order
    Mapping(Vec<(String, Node)>),
    /// Ordered elements
    Sequence(Vec<Node>),
    /// Terminal value
    Scalar(Scalar),
}

impl Node {
    /// Convert a parsed JSON value into a record tree
    ///
    /// Mapping entries keep the order they had in the source document, so
    /// traversal of a given record is deterministic.
    pub fn from_json(value: Value) -> Node {
        match value {
            Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from_json(v))).collect())
            }
            Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from_json).collect())
            }
            Value::String(s) => Node::Scalar(Scalar::Str(s)),
            Value::Number(n) => Node::Scalar(Scalar::Num(n.as_f64().unwrap_or(f64::NAN))),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Null => Node::Scalar(Scalar::Null),
        }
    }

    /// Borrow the string value of a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up a key in a mapping node, mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Mapping(entries) => {
                entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

/// One corpus record: an identifier plus its document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique source identifier ("tinyId" in the upstream registry)
    pub tiny_id: String,
    pub root: Node,
}

impl Record {
    pub fn new(tiny_id: impl Into<String>, root: Node) -> Self {
        Self {
            tiny_id: tiny_id.into(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        let node = Node::from_json(json!({
            "name": "systolic",
            "codes": [12, null],
            "active": true,
        }));

        let Node::Mapping(entries) = &node else {
            panic!("expected mapping");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "name");
        assert_eq!(node.get("name").unwrap().as_str(), Some("systolic"));
        assert_eq!(
            node.get("codes"),
            Some(&Node::Sequence(vec![
                Node::Scalar(Scalar::Num(12.0)),
                Node::Scalar(Scalar::Null),
            ]))
        );
        assert_eq!(node.get("active"), Some(&Node::Scalar(Scalar::Bool(true))));
        assert_eq!(node.get("missing"), None);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Scalar::Str("abc".into()).to_text(), "abc");
        assert_eq!(Scalar::Num(3.0).to_text(), "3");
        assert_eq!(Scalar::Num(3.5).to_text(), "3.5");
        assert_eq!(Scalar::Bool(false).to_text(), "false");
        assert_eq!(Scalar::Null.to_text(), "null");
    }

    #[test]
    fn test_null_like() {
        assert!(Scalar::Null.is_null_like());
        assert!(Scalar::Str(String::new()).is_null_like());
        assert!(Scalar::Str("null".into()).is_null_like());
        assert!(!Scalar::Str("0".into()).is_null_like());
        assert!(!Scalar::Num(0.0).is_null_like());
    }
}
