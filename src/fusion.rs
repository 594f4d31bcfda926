//! Hybrid decision policy.
//!
//! Remote LLM first, rule scorer when it is unavailable, TF-IDF matcher
//! alongside when hybrid mode is on and training examples exist. The
//! LLM/TF-IDF reconciliation is an ordered first-match table, see [`decide`].

use crate::batch::{self, BatchReport};
use crate::category::CategoryList;
use crate::config::ClassifierConfig;
use crate::remote::RemoteClassifier;
use crate::result::{ClassificationResult, Details, Method, Outcome};
use crate::rules::classify_rule_based;
use crate::similarity::{TrainingSet, classify_traditional};

/// TF-IDF similarity an agreeing match must exceed.
const TRADITIONAL_AGREEMENT_MIN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionConfig {
    pub use_hybrid: bool,
    pub confidence_threshold: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self { use_hybrid: true, confidence_threshold: 0.7 }
    }
}

impl From<&ClassifierConfig> for FusionConfig {
    fn from(c: &ClassifierConfig) -> Self {
        Self {
            use_hybrid: c.use_hybrid,
            confidence_threshold: c.confidence_threshold,
        }
    }
}

/// Merge a successful LLM answer with the optional TF-IDF answer.
///
/// 1. same category, LLM above threshold, TF-IDF above 0.5: averaged agreement
/// 2. LLM above threshold: LLM as-is
/// 3. otherwise: whichever is more confident (ties go to TF-IDF)
///
/// Without a TF-IDF answer (or with hybrid off) the LLM answer stands alone.
pub fn decide(
    llm: ClassificationResult,
    traditional: Option<ClassificationResult>,
    config: &FusionConfig,
) -> ClassificationResult {
    let traditional = match traditional {
        Some(t) if config.use_hybrid => t,
        _ => {
            let details = Details { llm: Box::new(llm.clone()), traditional: None };
            return llm.with_method(Method::LlmOnly).with_details(details);
        }
    };

    let details = Details {
        llm: Box::new(llm.clone()),
        traditional: Some(Box::new(traditional.clone())),
    };
    let llm_confident = llm.confidence > config.confidence_threshold;

    if llm.category == traditional.category
        && llm_confident
        && traditional.confidence > TRADITIONAL_AGREEMENT_MIN
    {
        let confidence = (llm.confidence + traditional.confidence) / 2.0;
        return ClassificationResult { confidence, ..llm }
            .with_method(Method::HybridAgreement)
            .with_details(details);
    }

    if llm_confident {
        return llm.with_method(Method::LlmHighConfidence).with_details(details);
    }

    let category = if llm.confidence > traditional.confidence {
        llm.category.clone()
    } else {
        traditional.category.clone()
    };
    let confidence = llm.confidence.max(traditional.confidence);
    ClassificationResult {
        category,
        confidence,
        method: Method::HybridWeighted,
        reasoning: llm.reasoning,
        details: Some(details),
    }
}

/// Stateless orchestrator over a remote classifier and fusion settings.
///
/// The training set is owned by the caller and passed into every call.
pub struct HybridClassifier {
    remote: Box<dyn RemoteClassifier>,
    config: FusionConfig,
}

impl HybridClassifier {
    pub fn new(remote: Box<dyn RemoteClassifier>, config: FusionConfig) -> Self {
        Self { remote, config }
    }

    /// Classify one text. Never fails: remote errors fall back to the rule scorer.
    pub fn classify(
        &self,
        text: &str,
        categories: &CategoryList,
        training: &TrainingSet,
    ) -> ClassificationResult {
        let llm = match self.remote.classify(text, categories) {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("remote classifier unavailable ({e}), using rule-based fallback");
                None
            }
        };

        let traditional = if self.config.use_hybrid && !training.is_empty() {
            classify_traditional(text, training)
        } else {
            None
        };

        match llm {
            Some(llm) => {
                let fused = decide(llm, traditional, &self.config);
                log::debug!(
                    "fusion: {} -> {} ({:.2})",
                    fused.method,
                    fused.category,
                    fused.confidence
                );
                fused
            }
            None => classify_rule_based(text, categories),
        }
    }

    /// End-to-end call from raw configuration input.
    ///
    /// Anything that escapes the classifier recoveries (a category string
    /// with no entries) becomes a terminal [`Outcome::Failed`].
    pub fn classify_request(&self, text: &str, categories: &str, training: &TrainingSet) -> Outcome {
        match CategoryList::parse(categories) {
            Ok(cats) => Outcome::Classified(self.classify(text, &cats, training)),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }

    /// Remote-or-rules classification of every text; no TF-IDF matching.
    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S], categories: &CategoryList) -> BatchReport {
        batch::classify_batch(texts, categories, self.remote.as_ref())
    }
}
