//! Python bindings for phrasemine
//!
//! Thin PyO3 wrappers over the mining pipeline. Results cross the boundary
//! as JSON strings so the Python side can `json.loads` them without a
//! generated class hierarchy.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::corpus::{self, CorpusError};
use crate::lemma::Lemmatizer;
use crate::miner::{ConfigError, Miner, MinerConfig};
use crate::output;
use crate::prune::PruneStrategy;
use crate::record::Record;

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<CorpusError> for PyErr {
    fn from(err: CorpusError) -> PyErr {
        match err {
            CorpusError::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Tokenize text into lowercased alphanumeric words
#[pyfunction]
fn tokenize(text: &str) -> Vec<String> {
    crate::tokenize::tokenize(text)
}

/// Normalize text through the full pipeline (lemmatize + stopword filter)
#[pyfunction]
#[pyo3(signature = (text, remove_stopwords = false, lemmatize = true))]
fn normalize(text: &str, remove_stopwords: bool, lemmatize: bool) -> Vec<String> {
    let lemmatizer = lemmatize.then(Lemmatizer::new);
    crate::tokenize::tokenize_and_normalize(text, remove_stopwords, lemmatizer.as_ref())
}

/// All contiguous token windows of at least `min_words` tokens
#[pyfunction]
#[pyo3(signature = (tokens, min_words = 2))]
fn extract_phrases(tokens: Vec<String>, min_words: usize) -> Vec<String> {
    crate::extract::extract_phrases(&tokens, min_words)
}

#[allow(clippy::too_many_arguments)]
fn run_miner(
    records: Vec<Record>,
    fields: Vec<String>,
    min_words: usize,
    remove_stopwords: bool,
    lemmatize: bool,
    min_ids: usize,
    prune: &str,
    verbatim: bool,
) -> PyResult<String> {
    let config = MinerConfig {
        field_names: fields,
        min_words,
        remove_stopwords,
        lemmatize,
        min_ids,
        prune: prune.parse::<PruneStrategy>()?,
        verbatim,
    };
    let miner = Miner::new(config)?;
    let result = miner.mine(&records);
    output::to_json(&result).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Mine phrases from a JSON array of records, returning the result as JSON
#[pyfunction]
#[pyo3(signature = (records_json, fields, min_words = 2, remove_stopwords = false,
                    lemmatize = true, min_ids = 2, prune = "none", verbatim = false))]
#[allow(clippy::too_many_arguments)]
fn mine_phrases(
    records_json: &str,
    fields: Vec<String>,
    min_words: usize,
    remove_stopwords: bool,
    lemmatize: bool,
    min_ids: usize,
    prune: &str,
    verbatim: bool,
) -> PyResult<String> {
    let records = corpus::records_from_json(records_json)?;
    run_miner(
        records,
        fields,
        min_words,
        remove_stopwords,
        lemmatize,
        min_ids,
        prune,
        verbatim,
    )
}

/// Mine phrases from a corpus file (`.json` or `.json.gz`)
#[pyfunction]
#[pyo3(signature = (path, fields, min_words = 2, remove_stopwords = false,
                    lemmatize = true, min_ids = 2, prune = "none", verbatim = false))]
#[allow(clippy::too_many_arguments)]
fn mine_corpus(
    path: &str,
    fields: Vec<String>,
    min_words: usize,
    remove_stopwords: bool,
    lemmatize: bool,
    min_ids: usize,
    prune: &str,
    verbatim: bool,
) -> PyResult<String> {
    let records = corpus::read_corpus(path)?;
    run_miner(
        records,
        fields,
        min_words,
        remove_stopwords,
        lemmatize,
        min_ids,
        prune,
        verbatim,
    )
}

#[pymodule]
fn phrasemine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(extract_phrases, m)?)?;
    m.add_function(wrap_pyfunction!(mine_phrases, m)?)?;
    m.add_function(wrap_pyfunction!(mine_corpus, m)?)?;
    Ok(())
}
