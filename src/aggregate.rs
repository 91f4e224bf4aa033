//! Incremental phrase-occurrence aggregation
//!
//! The central structure of a mining run: field path → phrase → set of
//! record identifiers. Record IDs repeat across thousands of (path, phrase)
//! entries, so they are interned once in a string pool and the sets hold
//! interned symbols. The map is built additively during traversal and is
//! read-only during pruning and output.

use lasso::{Rodeo, Spur};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

/// One field path's sub-map: phrase → interned record-ID set
pub type PhraseIds = FxHashMap<String, FxHashSet<Spur>>;

/// Field path → phrase → record-ID set
#[derive(Default)]
pub struct OccurrenceMap {
    ids: Rodeo,
    paths: FxHashMap<String, PhraseIds>,
}

impl OccurrenceMap {
    pub fn new() -> Self {
        Self {
            ids: Rodeo::default(),
            paths: FxHashMap::default(),
        }
    }

    /// Add `record_id` to the set at `paths[path][phrase]`, creating levels
    /// on demand. Re-inserting the same triple is a no-op.
    pub fn insert(&mut self, path: &str, phrase: String, record_id: &str) {
        let id = self.ids.get_or_intern(record_id);
        self.paths
            .entry(path.to_string())
            .or_default()
            .entry(phrase)
            .or_default()
            .insert(id);
    }

    /// Number of field paths present
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Total number of (path, phrase) entries
    pub fn phrase_count(&self) -> usize {
        self.paths.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Keep only phrases supported by at least `min_ids` records; paths left
    /// without phrases are removed entirely.
    pub fn filter_min_support(&mut self, min_ids: usize) {
        for phrases in self.paths.values_mut() {
            phrases.retain(|_, ids| ids.len() >= min_ids);
        }
        self.paths.retain(|_, phrases| !phrases.is_empty());
    }

    /// Replace each path's phrase sub-map with `f(sub_map)`
    ///
    /// Pruning is always local to one path; this is the hook the miner uses
    /// to run a pruning strategy over every path.
    pub fn transform_paths<F>(&mut self, mut f: F)
    where
        F: FnMut(PhraseIds) -> PhraseIds,
    {
        for phrases in self.paths.values_mut() {
            let taken = std::mem::take(phrases);
            *phrases = f(taken);
        }
        self.paths.retain(|_, phrases| !phrases.is_empty());
    }

    /// Sorted record IDs for one (path, phrase) entry
    pub fn ids_for(&self, path: &str, phrase: &str) -> Option<Vec<String>> {
        let ids = self.paths.get(path)?.get(phrase)?;
        Some(self.resolve_sorted(ids))
    }

    /// Convert to deterministic sorted output: paths and phrases in
    /// lexicographic order, ID lists sorted ascending.
    pub fn to_sorted(&self) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
        self.paths
            .iter()
            .map(|(path, phrases)| {
                let sorted = phrases
                    .iter()
                    .map(|(phrase, ids)| (phrase.clone(), self.resolve_sorted(ids)))
                    .collect();
                (path.clone(), sorted)
            })
            .collect()
    }

    fn resolve_sorted(&self, ids: &FxHashSet<Spur>) -> Vec<String> {
        let mut out: Vec<String> = ids.iter().map(|id| self.ids.resolve(id).to_string()).collect();
        out.sort();
        out
    }
}

/// Field path → lemma phrase → set of verbatim source strings
///
/// Built alongside the occurrence map when verbatim output is requested.
/// Lemmatization is many-to-one, so a single lemma phrase can map back to
/// several distinct verbatim field values; the values are interned since the
/// same field text recurs for every window extracted from it.
#[derive(Default)]
pub struct VerbatimMap {
    texts: Rodeo,
    paths: FxHashMap<String, FxHashMap<String, FxHashSet<Spur>>>,
}

impl VerbatimMap {
    pub fn new() -> Self {
        Self {
            texts: Rodeo::default(),
            paths: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, path: &str, phrase: &str, text: &str) {
        let text = self.texts.get_or_intern(text);
        self.paths
            .entry(path.to_string())
            .or_default()
            .entry(phrase.to_string())
            .or_default()
            .insert(text);
    }

    /// Sorted verbatim texts recorded for a (path, lemma-phrase) pair
    pub fn texts_for(&self, path: &str, phrase: &str) -> Vec<String> {
        let Some(texts) = self.paths.get(path).and_then(|m| m.get(phrase)) else {
            return Vec::new();
        };
        let mut out: Vec<String> = texts.iter().map(|t| self.texts.resolve(t).to_string()).collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut map = OccurrenceMap::new();
        map.insert("definition", "heart failure".into(), "C1");
        map.insert("definition", "heart failure".into(), "C1");
        map.insert("definition", "heart failure".into(), "C2");

        assert_eq!(
            map.ids_for("definition", "heart failure"),
            Some(vec!["C1".to_string(), "C2".to_string()])
        );
    }

    #[test]
    fn test_filter_min_support_drops_rare_phrases_and_empty_paths() {
        let mut map = OccurrenceMap::new();
        map.insert("definition", "heart failure".into(), "C1");
        map.insert("definition", "heart failure".into(), "C2");
        map.insert("definition", "failure treatment".into(), "C1");
        map.insert("designation", "blood pressure".into(), "C1");

        map.filter_min_support(2);

        let sorted = map.to_sorted();
        assert_eq!(sorted.len(), 1);
        assert_eq!(
            sorted["definition"].keys().collect::<Vec<_>>(),
            vec!["heart failure"]
        );
    }

    #[test]
    fn test_min_support_monotonicity() {
        let mut loose = OccurrenceMap::new();
        let mut strict = OccurrenceMap::new();
        for (phrase, id) in [("a b", "C1"), ("a b", "C2"), ("b c", "C1")] {
            loose.insert("definition", phrase.into(), id);
            strict.insert("definition", phrase.into(), id);
        }
        loose.filter_min_support(1);
        strict.filter_min_support(2);

        let loose = loose.to_sorted();
        let strict = strict.to_sorted();
        for (path, phrases) in &strict {
            for phrase in phrases.keys() {
                assert!(loose[path].contains_key(phrase));
            }
        }
    }

    #[test]
    fn test_sorted_output_is_deterministic() {
        let mut a = OccurrenceMap::new();
        a.insert("p", "x y".into(), "C2");
        a.insert("p", "x y".into(), "C1");

        let mut b = OccurrenceMap::new();
        b.insert("p", "x y".into(), "C1");
        b.insert("p", "x y".into(), "C2");

        assert_eq!(a.to_sorted(), b.to_sorted());
    }

    #[test]
    fn test_verbatim_texts_sorted() {
        let mut map = VerbatimMap::new();
        map.insert("definition", "heart failure", "Heart Failure.");
        map.insert("definition", "heart failure", "heart failures");
        map.insert("definition", "heart failure", "Heart Failure.");

        assert_eq!(
            map.texts_for("definition", "heart failure"),
            vec!["Heart Failure.".to_string(), "heart failures".to_string()]
        );
        assert!(map.texts_for("definition", "absent").is_empty());
    }
}
