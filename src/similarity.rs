//! Nearest-example classifier over user-supplied training texts.
//!
//! TF-IDF vectors for the training texts plus the query are built in one
//! pass, and the query takes the label of the most cosine-similar example.

use crate::HyclassError;
use crate::result::{ClassificationResult, Method};
use crate::vectorize::{TermVector, vectorize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub category: String,
}

/// Caller-owned, ordered collection of labeled examples.
///
/// Scan order is insertion order; similarity ties go to the earlier example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingSet {
    examples: Vec<TrainingExample>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an example. Text and (trimmed) category must be non-blank.
    pub fn add(&mut self, text: &str, category: &str) -> Result<&TrainingExample, HyclassError> {
        let category = category.trim();
        if text.trim().is_empty() {
            return Err(HyclassError::Config("training text is empty".into()));
        }
        if category.is_empty() {
            return Err(HyclassError::Config("training category is empty".into()));
        }
        self.examples.push(TrainingExample {
            text: text.to_string(),
            category: category.to_string(),
        });
        Ok(&self.examples[self.examples.len() - 1])
    }

    pub fn remove(&mut self, index: usize) -> Result<TrainingExample, HyclassError> {
        if index >= self.examples.len() {
            return Err(HyclassError::Config(format!(
                "no training example at index {index} (have {})",
                self.examples.len()
            )));
        }
        Ok(self.examples.remove(index))
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Cosine of the angle between two sparse vectors; 0 when either norm is 0.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Classify `input` by its most similar training example.
///
/// Returns `None` when the training set is empty ("traditional method
/// unavailable"), which is not an error.
pub fn classify_traditional(input: &str, training: &TrainingSet) -> Option<ClassificationResult> {
    if training.is_empty() {
        return None;
    }

    // Query goes last so training indices line up with vector indices.
    let mut corpus: Vec<&str> = training.examples.iter().map(|e| e.text.as_str()).collect();
    corpus.push(input);
    let vectors = vectorize(&corpus);
    let (query, train_vectors) = vectors.split_last()?;

    let mut best: Option<(usize, f64)> = None;
    for (idx, vector) in train_vectors.iter().enumerate() {
        let score = cosine_similarity(vector, query);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((idx, score));
        }
    }

    let (idx, score) = best?;
    let winner = &training.examples[idx];
    log::debug!(
        "tf-idf: best match #{idx} ({}) similarity {score:.3}",
        winner.category
    );
    Some(ClassificationResult::new(&winner.category, score, Method::TfIdf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> TrainingSet {
        let mut s = TrainingSet::new();
        for (text, cat) in pairs {
            s.add(text, cat).unwrap();
        }
        s
    }

    fn vector(pairs: &[(&str, f64)]) -> TermVector {
        pairs.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn empty_training_set_is_unavailable() {
        assert!(classify_traditional("anything", &TrainingSet::new()).is_none());
    }

    #[test]
    fn cosine_identical_and_orthogonal() {
        let a = vector(&[("x", 1.0), ("y", 2.0)]);
        let b = vector(&[("z", 3.0)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_zero_norm_is_zero() {
        let a = vector(&[("x", 1.0)]);
        let zero = vector(&[("x", 0.0)]);
        assert_eq!(cosine_similarity(&a, &TermVector::new()), 0.0);
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
    }

    #[test]
    fn picks_most_similar_example() {
        let training = set(&[
            ("the food was delicious and fresh", "food"),
            ("the train arrived late at the station", "travel"),
            ("my flight was delayed again", "travel"),
        ]);
        let r = classify_traditional("delicious fresh food tonight", &training).unwrap();
        assert_eq!(r.category, "food");
        assert_eq!(r.method, Method::TfIdf);
        assert!(r.confidence > 0.0 && r.confidence <= 1.0);
    }

    #[test]
    fn no_overlap_gives_zero_confidence_first_example() {
        let training = set(&[("alpha beta", "one"), ("gamma delta", "two")]);
        let r = classify_traditional("omega", &training).unwrap();
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.category, "one");
    }

    #[test]
    fn ties_keep_first_seen_example() {
        let training = set(&[("red apple", "first"), ("red apple", "second")]);
        let r = classify_traditional("red apple", &training).unwrap();
        assert_eq!(r.category, "first");
    }

    #[test]
    fn result_category_is_a_training_label() {
        let training = set(&[("good", "pos"), ("bad", "neg"), ("meh", "neu")]);
        for text in ["good stuff", "so bad", "", "meh meh good"] {
            let r = classify_traditional(text, &training).unwrap();
            assert!(["pos", "neg", "neu"].contains(&r.category.as_str()));
            assert!((0.0..=1.0).contains(&r.confidence));
        }
    }

    #[test]
    fn add_rejects_blank_fields_and_trims_category() {
        let mut s = TrainingSet::new();
        assert!(s.add("  ", "pos").is_err());
        assert!(s.add("text", " ").is_err());
        let ex = s.add("text", "  pos ").unwrap();
        assert_eq!(ex.category, "pos");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_by_index() {
        let mut s = set(&[("a", "x"), ("b", "y")]);
        let removed = s.remove(0).unwrap();
        assert_eq!(removed.text, "a");
        assert_eq!(s.examples()[0].text, "b");
        assert!(s.remove(5).is_err());
    }
}
