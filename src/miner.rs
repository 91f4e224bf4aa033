//! End-to-end phrase mining over a record corpus
//!
//! The pipeline for one run:
//! 1. Validate configuration (fail fast, before touching any record)
//! 2. Walk each record, visiting fields named in the configuration
//! 3. Tokenize/normalize each matched text value and extract phrases
//! 4. Aggregate (path, phrase) → record-ID occurrences corpus-wide
//! 5. Apply the configured pruning strategy per path
//! 6. Drop phrases below the support threshold and emit sorted output

use crate::aggregate::{OccurrenceMap, VerbatimMap};
use crate::extract::extract_phrases;
use crate::lemma::Lemmatizer;
use crate::prune::{PruneStrategy, prune_phrases};
use crate::record::Record;
use crate::tokenize::tokenize_and_normalize;
use crate::walk::walk_fields;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// A mining run rejected before any record was processed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field_names must not be empty")]
    EmptyFieldNames,
    #[error("min_words must be at least 1")]
    ZeroMinWords,
    #[error("min_ids must be at least 1")]
    ZeroMinIds,
    #[error("unknown prune strategy: {0:?} (expected none, per-id, global, or threshold)")]
    UnknownPruneStrategy(String),
}

/// Options for one mining run
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Leaf key names to match during traversal (required, non-empty)
    pub field_names: Vec<String>,
    /// Minimum phrase length in tokens
    pub min_words: usize,
    /// Drop stopwords after lemmatization
    pub remove_stopwords: bool,
    /// Normalize tokens through the POS-aware lemmatizer
    pub lemmatize: bool,
    /// Minimum number of distinct records supporting a phrase
    pub min_ids: usize,
    pub prune: PruneStrategy,
    /// Also emit the verbatim source text behind each lemma phrase
    pub verbatim: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            field_names: Vec::new(),
            min_words: 2,
            remove_stopwords: false,
            lemmatize: true,
            min_ids: 2,
            prune: PruneStrategy::None,
            verbatim: false,
        }
    }
}

impl MinerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.field_names.is_empty() {
            return Err(ConfigError::EmptyFieldNames);
        }
        if self.min_words == 0 {
            return Err(ConfigError::ZeroMinWords);
        }
        if self.min_ids == 0 {
            return Err(ConfigError::ZeroMinIds);
        }
        Ok(())
    }
}

/// Result of a mining run, in deterministic sorted form
///
/// `phrases`: field path → phrase → record IDs (ascending). `verbatim` adds
/// one level — field path → lemma phrase → verbatim text → record IDs — and
/// is present only when requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MineOutput {
    pub phrases: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>>,
}

/// Configured phrase miner
///
/// Construction validates the configuration and builds the lemmatizer once;
/// the miner itself is immutable across runs, so mining twice with the same
/// input yields identical output.
pub struct Miner {
    config: MinerConfig,
    fields: FxHashSet<String>,
    lemmatizer: Option<Lemmatizer>,
}

impl Miner {
    pub fn new(config: MinerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fields = config.field_names.iter().cloned().collect();
        let lemmatizer = config.lemmatize.then(Lemmatizer::new);
        Ok(Self {
            config,
            fields,
            lemmatizer,
        })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine the whole corpus in one batch
    ///
    /// Records with an empty identifier are logged and skipped; the output
    /// reflects exactly the processed records.
    pub fn mine(&self, records: &[Record]) -> MineOutput {
        let mut occurrences = OccurrenceMap::new();
        let mut verbatim = self.config.verbatim.then(VerbatimMap::new);

        for record in records {
            if record.tiny_id.is_empty() {
                warn!("skipping record without identifier");
                continue;
            }
            walk_fields(&record.root, &self.fields, &mut |path, text| {
                trace!(path, record = %record.tiny_id, "matched field");
                let tokens = tokenize_and_normalize(
                    text,
                    self.config.remove_stopwords,
                    self.lemmatizer.as_ref(),
                );
                let phrases = extract_phrases(&tokens, self.config.min_words);
                for phrase in phrases {
                    if let Some(map) = verbatim.as_mut() {
                        map.insert(path, &phrase, text);
                    }
                    occurrences.insert(path, phrase, &record.tiny_id);
                }
            });
        }
        debug!(
            paths = occurrences.path_count(),
            phrases = occurrences.phrase_count(),
            "aggregation complete"
        );

        let (min_ids, min_words) = (self.config.min_ids, self.config.min_words);
        occurrences
            .transform_paths(|phrases| prune_phrases(phrases, self.config.prune, min_ids, min_words));
        occurrences.filter_min_support(min_ids);

        let phrases = occurrences.to_sorted();
        let verbatim = verbatim.map(|map| {
            phrases
                .iter()
                .map(|(path, lemmas)| {
                    let lemmas = lemmas
                        .iter()
                        .map(|(lemma, ids)| {
                            let texts = map
                                .texts_for(path, lemma)
                                .into_iter()
                                .map(|text| (text, ids.clone()))
                                .collect();
                            (lemma.clone(), texts)
                        })
                        .collect();
                    (path.clone(), lemmas)
                })
                .collect()
        });

        MineOutput { phrases, verbatim }
    }
}
