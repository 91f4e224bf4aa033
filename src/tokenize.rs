//! Text tokenization for phrase mining
//!
//! Pipeline: lowercase → split on Unicode whitespace → trim punctuation at
//! token edges → drop tokens with interior punctuation → optional
//! POS-aware lemmatization → optional stopword removal.
//!
//! Tokens with interior punctuation ("N/A", "state-of-the-art") are dropped
//! whole rather than split, and punctuation-only tokens disappear entirely.
//! Empty or all-punctuation input yields an empty token list, never an error.

use crate::lemma::Lemmatizer;

/// English stopwords (articles, prepositions, conjunctions, pronouns,
/// auxiliaries), restricted to forms the tokenizer can actually produce.
///
/// Sorted for binary search.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am",
    "an", "and", "any", "are", "aren", "as", "at", "be", "because", "been",
    "before", "being", "below", "between", "both", "but", "by", "can",
    "couldn", "d", "did", "didn", "do", "does", "doesn", "doing", "don",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "isn", "it", "its", "itself", "just", "ll", "m", "ma", "me", "mightn",
    "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "ourselves", "out", "over", "own", "re", "s", "same", "shan",
    "she", "should", "shouldn", "so", "some", "such", "t", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "ve", "very", "was", "wasn", "we", "were", "weren", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
];

/// Check whether a (lowercased) token is a stopword
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Split text into lowercased alphanumeric word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split_whitespace()
        .filter_map(|chunk| {
            let word = chunk.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() && word.chars().all(char::is_alphanumeric) {
                Some(word.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Drop stopwords from a token sequence
pub fn remove_stopwords(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| !is_stopword(t)).collect()
}

/// Full normalization pipeline: tokenize, lemmatize when a lemmatizer is
/// supplied, then filter stopwords when requested.
///
/// Stopword removal runs after lemmatization, so inflected stopword forms
/// that lemmatize into the list ("has" → "have") are also removed.
pub fn tokenize_and_normalize(
    text: &str,
    strip_stopwords: bool,
    lemmatizer: Option<&Lemmatizer>,
) -> Vec<String> {
    let mut tokens = tokenize(text);
    if let Some(lemmatizer) = lemmatizer {
        tokens = tokens.iter().map(|t| lemmatizer.lemmatize(t)).collect();
    }
    if strip_stopwords {
        tokens = remove_stopwords(tokens);
    }
    tokens
}
