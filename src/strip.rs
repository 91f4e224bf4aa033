//! In-place phrase removal
//!
//! The inverse workflow of mining: after boilerplate phrases are identified,
//! strip them back out of the records they came from. Each (path, phrase)
//! pair is applied to every record; the phrase must match the field text
//! exactly (verbatim, not lemmatized). Paths that do not resolve, or that
//! resolve to non-strings, are skipped quietly.

use crate::pathexpr::{PathExpr, Segment};
use crate::record::{Node, Record, Scalar};
use tracing::debug;

/// Replace every occurrence of `phrase` in the string fields `path` reaches
///
/// Returns the number of fields changed.
pub fn replace_phrase(root: &mut Node, path: &PathExpr, phrase: &str, replacement: &str) -> usize {
    descend(root, path.segments(), phrase, replacement)
}

/// Remove phrases from all records; returns the number of fields changed
pub fn strip_phrases(records: &mut [Record], pairs: &[(PathExpr, String)]) -> usize {
    let mut changed = 0;
    for record in records.iter_mut() {
        for (path, phrase) in pairs {
            changed += replace_phrase(&mut record.root, path, phrase, "");
        }
    }
    changed
}

fn descend(node: &mut Node, segments: &[Segment], phrase: &str, replacement: &str) -> usize {
    let Some((segment, rest)) = segments.split_first() else {
        return replace_in_leaf(node, phrase, replacement);
    };

    match (segment, node) {
        (Segment::Key(key), node @ Node::Mapping(_)) => match node.get_mut(key) {
            Some(child) => descend(child, rest, phrase, replacement),
            None => {
                debug!(key = key.as_str(), "key not present, skipping");
                0
            }
        },
        (Segment::Index(index), Node::Sequence(items)) => match items.get_mut(*index) {
            Some(child) => descend(child, rest, phrase, replacement),
            None => 0,
        },
        (Segment::Wildcard, Node::Sequence(items)) => items
            .iter_mut()
            .map(|child| descend(child, rest, phrase, replacement))
            .sum(),
        _ => {
            debug!("path segment does not match node shape, skipping");
            0
        }
    }
}

fn replace_in_leaf(node: &mut Node, phrase: &str, replacement: &str) -> usize {
    let Node::Scalar(Scalar::Str(text)) = node else {
        debug!("path target is not a string, skipping");
        return 0;
    };
    if !text.contains(phrase) {
        return 0;
    }
    *text = text.replace(phrase, replacement);
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Node;
    use serde_json::json;

    fn path(expr: &str) -> PathExpr {
        PathExpr::parse(expr).unwrap()
    }

    #[test]
    fn test_replace_simple_field() {
        let mut root = Node::from_json(json!({"definition": "heart failure treatment"}));
        let changed = replace_phrase(&mut root, &path("definition"), " treatment", "");
        assert_eq!(changed, 1);
        assert_eq!(root.get("definition").unwrap().as_str(), Some("heart failure"));
    }

    #[test]
    fn test_replace_through_wildcard() {
        let mut root = Node::from_json(json!({
            "definitions": [
                {"definition": "see instructions: heart failure"},
                {"definition": "heart failure"},
                {"definition": "unrelated"},
            ],
        }));

        let changed = replace_phrase(
            &mut root,
            &path("definitions.*.definition"),
            "see instructions: ",
            "",
        );
        assert_eq!(changed, 1);
        let values: Vec<_> = path("definitions.*.definition")
            .resolve(&root)
            .into_iter()
            .filter_map(Node::as_str)
            .collect();
        assert_eq!(values, vec!["heart failure", "heart failure", "unrelated"]);
    }

    #[test]
    fn test_mismatched_paths_are_skipped() {
        let mut root = Node::from_json(json!({"definition": 42, "other": "text"}));
        assert_eq!(replace_phrase(&mut root, &path("definition"), "4", ""), 0);
        assert_eq!(replace_phrase(&mut root, &path("missing.key"), "x", ""), 0);
        assert_eq!(replace_phrase(&mut root, &path("other.*"), "x", ""), 0);
    }

    #[test]
    fn test_strip_phrases_over_records() {
        let mut records = vec![
            Record::new("C1", Node::from_json(json!({"definition": "copy text. heart failure"}))),
            Record::new("C2", Node::from_json(json!({"definition": "copy text. other"}))),
        ];
        let pairs = vec![(path("definition"), "copy text. ".to_string())];

        let changed = strip_phrases(&mut records, &pairs);
        assert_eq!(changed, 2);
        assert_eq!(
            records[0].root.get("definition").unwrap().as_str(),
            Some("heart failure")
        );
        assert_eq!(records[1].root.get("definition").unwrap().as_str(), Some("other"));
    }
}
