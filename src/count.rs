//! Field counting across a corpus
//!
//! Answers "how many records carry a value at these fields, and what kind of
//! value" without extracting phrases. Fields are selected by exact path,
//! leaf key name, or a `*`-wildcard path pattern; matched values are tested
//! against a value rule, and counts can be grouped by a record-level key and
//! broken out by a coarse value-type classification.

use crate::miner::ConfigError;
use crate::record::{Record, Scalar};
use crate::walk::{leaf_segment, walk_scalars};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::trace;

/// Rule a matched field's value must satisfy to be counted
#[derive(Debug, Clone, Default)]
pub enum ValueMatch {
    /// Value is present: not null, not empty, not the literal "null"
    #[default]
    NonNull,
    /// Value is absent
    Null,
    /// Value renders exactly to this text
    Fixed(String),
    /// Value text matches this pattern
    Pattern(Regex),
}

impl ValueMatch {
    fn matches(&self, scalar: &Scalar) -> bool {
        match self {
            ValueMatch::NonNull => !scalar.is_null_like(),
            ValueMatch::Null => scalar.is_null_like(),
            ValueMatch::Fixed(expected) => scalar.to_text() == *expected,
            ValueMatch::Pattern(regex) => regex.is_match(&scalar.to_text()),
        }
    }
}

/// How to find the grouping value inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Top-level mapping key
    TopLevel,
    /// Any leaf whose dotted path contains the key
    PathContains,
    /// Any leaf whose final path segment equals the key
    Terminal,
}

#[derive(Debug, Clone)]
pub struct GroupBy {
    pub key: String,
    pub kind: GroupKind,
}

#[derive(Debug, Clone)]
pub struct CountConfig {
    /// Exact paths, leaf key names, or `*`-wildcard path patterns
    pub field_names: Vec<String>,
    pub value_match: ValueMatch,
    pub group_by: Option<GroupBy>,
    /// Strings at most this long classify as a bounded "strN" type
    pub char_limit: usize,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            field_names: Vec::new(),
            value_match: ValueMatch::NonNull,
            group_by: None,
            char_limit: 10,
        }
    }
}

/// Group key used when no grouping is configured
pub const GLOBAL_GROUP: &str = "<global>";
/// Group key used when the grouping value cannot be found in a record
pub const UNKNOWN_GROUP: &str = "<unknown>";

/// Count matching fields: field → group → count
pub fn count_matching_fields(
    records: &[Record],
    config: &CountConfig,
) -> Result<BTreeMap<String, BTreeMap<String, u64>>, ConfigError> {
    let typed = count_matching_fields_by_type(records, config)?;
    let mut flat: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for (field, types) in typed {
        let groups = flat.entry(field).or_default();
        for counts in types.into_values() {
            for (group, count) in counts {
                *groups.entry(group).or_insert(0) += count;
            }
        }
    }
    Ok(flat)
}

/// Count matching fields broken out by value type: field → type → group →
/// count. Types are `null`, `bool`, `int`, `float`, `str`, and `strN` for
/// strings within the configured char limit.
pub fn count_matching_fields_by_type(
    records: &[Record],
    config: &CountConfig,
) -> Result<BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>>, ConfigError> {
    let patterns = build_patterns(config)?;
    let mut results: BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>> = BTreeMap::new();

    for record in records {
        // Per-record pass so the whole record shares one group value
        let mut flat: FxHashMap<String, u64> = FxHashMap::default();
        let mut flat_types: FxHashMap<String, String> = FxHashMap::default();

        walk_scalars(&record.root, &mut |path, scalar| {
            let Some(key) = match_field(&patterns, path) else {
                return;
            };
            if config.value_match.matches(scalar) {
                *flat.entry(key.clone()).or_insert(0) += 1;
                flat_types.insert(key, classify_type(scalar, config.char_limit));
            }
        });

        if flat.is_empty() {
            continue;
        }
        let group = match &config.group_by {
            Some(group_by) => find_group_value(record, group_by),
            None => GLOBAL_GROUP.to_string(),
        };
        trace!(record = %record.tiny_id, group = %group, "counting record");

        for (key, count) in flat {
            let value_type = flat_types
                .remove(&key)
                .unwrap_or_else(|| "unknown".to_string());
            *results
                .entry(key)
                .or_default()
                .entry(value_type)
                .or_default()
                .entry(group.clone())
                .or_insert(0) += count;
        }
    }
    Ok(results)
}

struct FieldPattern {
    raw: String,
    regex: Option<Regex>,
}

fn build_patterns(config: &CountConfig) -> Result<Vec<FieldPattern>, ConfigError> {
    if config.field_names.is_empty() {
        return Err(ConfigError::EmptyFieldNames);
    }
    Ok(config
        .field_names
        .iter()
        .map(|name| {
            let regex = name.contains('*').then(|| {
                let pattern = format!("^{}$", regex::escape(name).replace(r"\*", ".*"));
                Regex::new(&pattern).expect("escaped pattern is always valid")
            });
            FieldPattern {
                raw: name.clone(),
                regex,
            }
        })
        .collect())
}

/// The result key for a matched leaf: the configured name when it matched by
/// exact path, otherwise the leaf key
fn match_field(patterns: &[FieldPattern], path: &str) -> Option<String> {
    let base = leaf_segment(path);
    for pattern in patterns {
        if pattern.raw == path {
            return Some(path.to_string());
        }
        if pattern.raw == base {
            return Some(base.to_string());
        }
        if let Some(regex) = &pattern.regex {
            if regex.is_match(path) {
                return Some(base.to_string());
            }
        }
    }
    None
}

fn classify_type(scalar: &Scalar, char_limit: usize) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(_) => "bool".to_string(),
        Scalar::Num(n) => {
            if n.fract() == 0.0 {
                "int".to_string()
            } else {
                "float".to_string()
            }
        }
        Scalar::Str(s) => {
            if s.chars().count() <= char_limit {
                format!("str{}", char_limit)
            } else {
                "str".to_string()
            }
        }
    }
}

fn find_group_value(record: &Record, group_by: &GroupBy) -> String {
    match group_by.kind {
        GroupKind::TopLevel => match record.root.get(&group_by.key) {
            Some(crate::record::Node::Scalar(scalar)) => scalar.to_text(),
            _ => UNKNOWN_GROUP.to_string(),
        },
        GroupKind::PathContains | GroupKind::Terminal => {
            let mut found = UNKNOWN_GROUP.to_string();
            walk_scalars(&record.root, &mut |path, scalar| {
                let hit = match group_by.kind {
                    GroupKind::PathContains => path.contains(&group_by.key),
                    _ => leaf_segment(path) == group_by.key,
                };
                if hit {
                    found = scalar.to_text();
                }
            });
            found
        }
    }
}
