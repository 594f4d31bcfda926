//! Bag-of-words vectorizer: term counts and corpus-relative TF-IDF weights.
//!
//! Vectors are rebuilt for every classification call; nothing is cached.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Sparse vector keyed by term. Ordered so that float sums are reproducible.
pub type TermVector = BTreeMap<String, f64>;

// ASCII word characters only; accented letters act as separators.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]+").expect("static regex"));

/// Lowercase the text and return every maximal run of ASCII word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Occurrence count per term.
pub fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Number of documents containing each term at least once.
pub fn document_frequencies(counts: &[BTreeMap<String, usize>]) -> BTreeMap<String, usize> {
    let mut df = BTreeMap::new();
    for doc in counts {
        for term in doc.keys() {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }
    df
}

/// Term-frequency vector (weight = raw count).
pub fn tf_vector(text: &str) -> TermVector {
    term_counts(text)
        .into_iter()
        .map(|(term, n)| (term, n as f64))
        .collect()
}

/// TF-IDF vectors for a whole corpus, aligned with the input by index.
///
/// weight = (count / terms in document) * ln(corpus size / document frequency).
/// A term present in every document weighs 0; an empty document yields an
/// empty vector.
pub fn vectorize<S: AsRef<str>>(corpus: &[S]) -> Vec<TermVector> {
    let counts: Vec<BTreeMap<String, usize>> =
        corpus.iter().map(|d| term_counts(d.as_ref())).collect();
    let df = document_frequencies(&counts);
    let n = corpus.len() as f64;

    counts
        .iter()
        .map(|doc| {
            let total: usize = doc.values().sum();
            doc.iter()
                .map(|(term, &count)| {
                    let tf = count as f64 / total as f64;
                    // every term in `doc` was counted into `df`
                    let idf = (n / df[term] as f64).ln();
                    (term.clone(), tf * idf)
                })
                .collect()
        })
        .collect()
}
