//! Phrase extraction from token sequences
//!
//! A phrase is a contiguous token window joined with single spaces. For a
//! field value with `n` tokens the candidate count is quadratic in `n`, so
//! long text fields with a small minimum window dominate memory; that is the
//! known scaling limit of batch mining.

/// All contiguous windows of `min_words..=tokens.len()` tokens, space-joined
///
/// Windows are produced smallest-size first, then by start index. Callers
/// must not rely on this order in outputs, but it is stable for testing.
/// Fewer than `min_words` tokens yields no phrases.
pub fn extract_phrases(tokens: &[String], min_words: usize) -> Vec<String> {
    let min_words = min_words.max(1);
    if tokens.len() < min_words {
        return Vec::new();
    }

    let mut phrases = Vec::new();
    for size in min_words..=tokens.len() {
        for start in 0..=tokens.len() - size {
            phrases.push(tokens[start..start + size].join(" "));
        }
    }
    phrases
}
