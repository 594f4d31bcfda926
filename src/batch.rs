//! Batch classification: remote-or-rules per text, plus summary stats.

use crate::category::CategoryList;
use crate::remote::RemoteClassifier;
use crate::result::ClassificationResult;
use crate::rules::classify_rule_based;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    pub text: String,
    #[serde(flatten)]
    pub result: ClassificationResult,
    /// True when the remote call failed and the rule scorer answered.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    #[serde(serialize_with = "two_decimals")]
    pub avg_confidence: f64,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let total = items.len();
        let avg_confidence = if total == 0 {
            0.0
        } else {
            items.iter().map(|i| i.result.confidence).sum::<f64>() / total as f64
        };
        Self { total, avg_confidence }
    }

    /// Mean confidence as shown to users ("0.70").
    pub fn avg_confidence_display(&self) -> String {
        format!("{:.2}", self.avg_confidence)
    }
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Classify each text independently. A remote failure on one item only
/// downgrades that item to the rule scorer.
pub fn classify_batch<S: AsRef<str>>(
    texts: &[S],
    categories: &CategoryList,
    remote: &dyn RemoteClassifier,
) -> BatchReport {
    let results: Vec<BatchItem> = texts
        .iter()
        .map(|t| {
            let text = t.as_ref();
            let (result, fallback) = match remote.classify(text, categories) {
                Ok(r) => (r, false),
                Err(e) => {
                    log::warn!("batch item fell back to rules: {e}");
                    (classify_rule_based(text, categories), true)
                }
            };
            BatchItem { text: text.to_string(), result, fallback }
        })
        .collect();

    let summary = BatchSummary::from_items(&results);
    log::debug!(
        "batch: {} items, avg confidence {}",
        summary.total,
        summary.avg_confidence_display()
    );
    BatchReport { results, summary }
}

/// Split multi-line input into texts, dropping blank lines.
pub fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HyclassError;
    use crate::result::Method;

    /// Succeeds only for texts containing "llm".
    struct Selective;

    impl RemoteClassifier for Selective {
        fn classify(&self, text: &str, c: &CategoryList) -> Result<ClassificationResult, HyclassError> {
            if text.contains("llm") {
                Ok(ClassificationResult::new(c.first(), 0.9, Method::Llm))
            } else {
                Err(HyclassError::Remote("timeout".into()))
            }
        }
    }

    fn cats() -> CategoryList {
        CategoryList::parse("positive, negative, neutral").unwrap()
    }

    fn item(confidence: f64) -> BatchItem {
        BatchItem {
            text: String::new(),
            result: ClassificationResult::new("neutral", confidence, Method::Llm),
            fallback: false,
        }
    }

    #[test]
    fn summary_average_rounds_to_two_decimals() {
        let summary = BatchSummary::from_items(&[item(0.5), item(0.7), item(0.9)]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.avg_confidence_display(), "0.70");
        let v = serde_json::to_value(&summary).unwrap();
        assert_eq!(v["avgConfidence"], 0.7);
        assert_eq!(v["total"], 3);
    }

    #[test]
    fn empty_batch_summary() {
        let report = classify_batch::<&str>(&[], &cats(), &Selective);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.avg_confidence, 0.0);
    }

    #[test]
    fn per_item_failures_are_isolated() {
        let texts = ["llm handles this", "terrible rules fallback", "llm again"];
        let report = classify_batch(&texts, &cats(), &Selective);
        assert_eq!(report.results.len(), 3);

        assert!(!report.results[0].fallback);
        assert_eq!(report.results[0].result.method, Method::Llm);

        let fell_back = &report.results[1];
        assert!(fell_back.fallback);
        assert_eq!(fell_back.result.method, Method::RuleBased);
        assert_eq!(fell_back.result.category, "negative");
        assert_eq!(fell_back.text, "terrible rules fallback");

        assert!(!report.results[2].fallback);
        assert_eq!(report.summary.total, 3);
    }

    #[test]
    fn item_serializes_flat_with_text_and_fallback() {
        let report = classify_batch(&["plain text"], &cats(), &Selective);
        let v = serde_json::to_value(&report).unwrap();
        let first = &v["results"][0];
        assert_eq!(first["text"], "plain text");
        assert_eq!(first["fallback"], true);
        assert_eq!(first["method"], "Enhanced Rule-Based");
        assert_eq!(first["category"], "neutral");
    }

    #[test]
    fn split_lines_skips_blank() {
        let texts = split_lines("first\n\n   \nsecond line\n");
        assert_eq!(texts, vec!["first", "second line"]);
    }
}
