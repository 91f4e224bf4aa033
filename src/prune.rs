//! Phrase-subsumption pruning strategies
//!
//! A short phrase is redundant when a longer phrase already conveys the same
//! grouping information. Three policies decide "redundant" differently:
//! per-record-ID (keep the short phrase wherever the long one is absent),
//! global (discard the short phrase everywhere), and threshold-relative
//! (discard only when the long phrase's ID set dominates the short one's).
//! All three operate on a single field path's phrase → ID-set sub-map;
//! pruning never crosses paths and never invents attributions.
//!
//! Candidate order is shared by all strategies: word count descending, then
//! lexicographic ascending. Reproducing this order exactly is what makes
//! output deterministic when equal-length phrases compete.

use crate::aggregate::PhraseIds;
use crate::miner::ConfigError;
use lasso::Spur;
use memchr::memmem;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::str::FromStr;

/// Which subsumption policy to apply after aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneStrategy {
    /// Keep everything
    #[default]
    None,
    /// Subsume per record ID; a phrase survives if kept for any ID
    PerId,
    /// Subsume across the whole path regardless of ID sets
    Global,
    /// Subsume only when the longer phrase's ID set is a superset
    Threshold,
}

impl FromStr for PruneStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PruneStrategy::None),
            "per-id" => Ok(PruneStrategy::PerId),
            "global" => Ok(PruneStrategy::Global),
            "threshold" => Ok(PruneStrategy::Threshold),
            other => Err(ConfigError::UnknownPruneStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for PruneStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PruneStrategy::None => "none",
            PruneStrategy::PerId => "per-id",
            PruneStrategy::Global => "global",
            PruneStrategy::Threshold => "threshold",
        };
        f.write_str(name)
    }
}

/// Apply `strategy` to one path's phrase → ID-set map
///
/// `min_ids` and `min_words` are only consulted by the threshold strategy.
pub fn prune_phrases(
    phrases: PhraseIds,
    strategy: PruneStrategy,
    min_ids: usize,
    min_words: usize,
) -> PhraseIds {
    match strategy {
        PruneStrategy::None => phrases,
        PruneStrategy::PerId => prune_per_id(phrases),
        PruneStrategy::Global => prune_global(phrases),
        PruneStrategy::Threshold => prune_threshold(phrases, min_ids, min_words),
    }
}

/// For each record ID, keep only its longest non-subsumed phrases; a phrase
/// survives overall when kept for at least one ID.
fn prune_per_id(phrases: PhraseIds) -> PhraseIds {
    let mut by_id: FxHashMap<Spur, Vec<&String>> = FxHashMap::default();
    for (phrase, ids) in &phrases {
        for id in ids {
            by_id.entry(*id).or_default().push(phrase);
        }
    }

    let mut kept_map = PhraseIds::default();
    for (id, mut candidates) in by_id {
        sort_candidates(&mut candidates);
        let mut kept: Vec<&String> = Vec::new();
        for phrase in candidates {
            if !kept.iter().any(|longer| is_proper_substring(phrase, longer)) {
                kept.push(phrase);
            }
        }
        for phrase in kept {
            kept_map.entry(phrase.clone()).or_default().insert(id);
        }
    }
    kept_map
}

/// Keep only phrases that are not substrings of an already-kept longer
/// phrase, ignoring ID sets entirely. Size-aggressive and lossy: a short
/// phrase is dropped even when its ID set differs from the longer phrase's.
fn prune_global(phrases: PhraseIds) -> PhraseIds {
    let mut candidates: Vec<&String> = phrases.keys().collect();
    sort_candidates(&mut candidates);

    let mut kept: Vec<&String> = Vec::new();
    for phrase in candidates {
        if !kept.iter().any(|longer| is_proper_substring(phrase, longer)) {
            kept.push(phrase);
        }
    }

    let kept: FxHashSet<String> = kept.into_iter().cloned().collect();
    phrases
        .into_iter()
        .filter(|(phrase, _)| kept.contains(phrase))
        .collect()
}

/// Keep phrases meeting the support and length floors whose ID set is not
/// dominated by a longer retained phrase.
///
/// Domination is true superset containment of ID sets, not a cardinality
/// comparison; a short phrase with even one record of its own survives.
fn prune_threshold(phrases: PhraseIds, min_ids: usize, min_words: usize) -> PhraseIds {
    let mut candidates: Vec<&String> = phrases.keys().collect();
    sort_candidates(&mut candidates);

    let mut retained: Vec<&String> = Vec::new();
    for phrase in candidates {
        let ids = &phrases[phrase];
        if ids.len() < min_ids || word_count(phrase) < min_words {
            continue;
        }
        let subsumed = retained.iter().any(|longer| {
            is_proper_substring(phrase, longer) && phrases[*longer].is_superset(ids)
        });
        if !subsumed {
            retained.push(phrase);
        }
    }

    let retained: FxHashSet<String> = retained.into_iter().cloned().collect();
    phrases
        .into_iter()
        .filter(|(phrase, _)| retained.contains(phrase))
        .collect()
}

/// Word count descending, then lexicographic ascending
fn sort_candidates(candidates: &mut [&String]) {
    candidates.sort_by(|a, b| {
        word_count(b)
            .cmp(&word_count(a))
            .then_with(|| a.as_str().cmp(b.as_str()))
    });
}

fn word_count(phrase: &str) -> usize {
    phrase.split(' ').count()
}

/// `needle` occurs inside `haystack` and is strictly shorter
fn is_proper_substring(needle: &str, haystack: &str) -> bool {
    needle.len() < haystack.len()
        && memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}
