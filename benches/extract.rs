use divan::{Bencher, black_box};
use phrasemine::extract::extract_phrases;
use phrasemine::lemma::Lemmatizer;
use phrasemine::tokenize::{tokenize, tokenize_and_normalize};

fn main() {
    divan::main();
}

const DEFINITION: &str = "Heart failure is a clinical syndrome in which the \
    heart is unable to pump sufficient blood to meet the metabolic demands of \
    the body, commonly assessed through ejection fraction measurements and \
    graded by standardized functional classification of symptom severity";

/// Tokenization alone
#[divan::bench]
fn tokenize_definition(bencher: Bencher) {
    bencher.bench_local(|| tokenize(black_box(DEFINITION)));
}

/// Full normalization: tokenize, lemmatize, stopword filter
#[divan::bench]
fn normalize_definition(bencher: Bencher) {
    let lemmatizer = Lemmatizer::new();
    bencher.bench_local(|| {
        tokenize_and_normalize(black_box(DEFINITION), true, Some(&lemmatizer))
    });
}

/// Window extraction at several minimum sizes (quadratic in token count)
#[divan::bench(args = [2, 3, 5])]
fn extract_windows(bencher: Bencher, min_words: usize) {
    let tokens = tokenize(DEFINITION);
    bencher.bench_local(|| extract_phrases(black_box(&tokens), min_words));
}
