//! Phrasemine: phrase mining over nested clinical-metadata records
//!
//! Walks corpora of schema-validated record trees, extracts normalized
//! phrases from targeted text fields, aggregates phrase → record-ID
//! occurrences, and prunes redundant sub-phrases under several policies.
//! Core implementation in Rust with optional Python bindings.

// Core modules (pipeline order)
pub mod record; // Record trees: mapping / sequence / scalar nodes
pub mod corpus; // Corpus loading from JSON (optionally gzipped)
pub mod walk; // Generic traversal with dotted, wildcard-collapsed paths
pub mod tokenize; // Word tokenization and stopword filtering
pub mod lemma; // POS tagging and lemmatization
pub mod extract; // Contiguous n-gram phrase extraction
pub mod aggregate; // Path → phrase → record-ID occurrence maps
pub mod prune; // Sub-phrase subsumption strategies
pub mod miner; // End-to-end mining pipeline

// Companion tooling
pub mod count; // Field counting with grouping and type breakdown
pub mod output; // JSON/CSV/TSV result writers
pub mod pathexpr; // Dotted path expressions with wildcards
pub mod strip; // In-place phrase removal from records

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use aggregate::{OccurrenceMap, VerbatimMap};
pub use corpus::{CorpusError, read_corpus, records_from_json};
pub use extract::extract_phrases;
pub use lemma::{Lemmatizer, PosTag};
pub use miner::{ConfigError, MineOutput, Miner, MinerConfig};
pub use pathexpr::PathExpr;
pub use prune::PruneStrategy;
pub use record::{Node, Record, Scalar};
pub use tokenize::{tokenize, tokenize_and_normalize};
