//! Generic traversal over record trees
//!
//! Visits leaves with a dotted field path. Sequence elements all contribute
//! the same literal `*` segment, so sibling array elements are not
//! distinguished: the path for any definition inside a `definitions` array is
//! `definitions.*.definition` no matter its index.

use crate::record::{Node, Scalar};
use rustc_hash::FxHashSet;

/// Visit every scalar leaf with its dotted path
pub fn walk_scalars<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&str, &Scalar),
{
    let mut path = String::new();
    descend(node, &mut path, &mut |path, scalar| visitor(path, scalar));
}

/// Visit string leaves whose own key name is in `field_names`
///
/// Matching is by the final path segment only: a field named `definition`
/// matches at any depth. Strings sitting directly inside a sequence have a
/// `*` final segment and therefore never match a field name.
pub fn walk_fields<F>(node: &Node, field_names: &FxHashSet<String>, visitor: &mut F)
where
    F: FnMut(&str, &str),
{
    let mut path = String::new();
    descend(node, &mut path, &mut |path, scalar| {
        if let Scalar::Str(text) = scalar {
            if field_names.contains(leaf_segment(path)) {
                visitor(path, text);
            }
        }
    });
}

/// Final segment of a dotted path
pub fn leaf_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn descend<F>(node: &Node, path: &mut String, visitor: &mut F)
where
    F: FnMut(&str, &Scalar),
{
    match node {
        Node::Mapping(entries) => {
            for (key, value) in entries {
                let mark = push_segment(path, key);
                descend(value, path, visitor);
                path.truncate(mark);
            }
        }
        Node::Sequence(items) => {
            for item in items {
                let mark = push_segment(path, "*");
                descend(item, path, visitor);
                path.truncate(mark);
            }
        }
        Node::Scalar(scalar) => visitor(path, scalar),
    }
}

/// Append `.segment` (or a bare segment at the root), returning the length to
/// truncate back to
fn push_segment(path: &mut String, segment: &str) -> usize {
    let mark = path.len();
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(segment);
    mark
}
