use serde::{Deserialize, Serialize};

/// Which path produced a result. Serialized as the display tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "LLM")]
    Llm,
    #[serde(rename = "TF-IDF")]
    TfIdf,
    #[serde(rename = "Enhanced Rule-Based")]
    RuleBased,
    #[serde(rename = "Hybrid (Agreement)")]
    HybridAgreement,
    #[serde(rename = "LLM (High Confidence)")]
    LlmHighConfidence,
    #[serde(rename = "Hybrid (Weighted)")]
    HybridWeighted,
    #[serde(rename = "LLM Only")]
    LlmOnly,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Llm => "LLM",
            Method::TfIdf => "TF-IDF",
            Method::RuleBased => "Enhanced Rule-Based",
            Method::HybridAgreement => "Hybrid (Agreement)",
            Method::LlmHighConfidence => "LLM (High Confidence)",
            Method::HybridWeighted => "Hybrid (Weighted)",
            Method::LlmOnly => "LLM Only",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-results kept alongside a fused decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub llm: Box<ClassificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traditional: Option<Box<ClassificationResult>>,
}

/// One classifier's answer. Confidence is always within [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub confidence: f64,
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl ClassificationResult {
    pub fn new(category: impl Into<String>, confidence: f64, method: Method) -> Self {
        Self {
            category: category.into(),
            confidence: confidence.clamp(0.0, 1.0),
            method,
            reasoning: None,
            details: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }
}

/// Terminal error report, distinct from a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub error: bool,
    pub message: String,
}

/// Final answer of an end-to-end classify call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Classified(ClassificationResult),
    Failed(FailureReport),
}

impl Outcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Outcome::Failed(FailureReport { error: true, message: message.into() })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Outcome::Classified(r) => Some(r),
            Outcome::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_serializes_as_display_tag() {
        let json = serde_json::to_string(&Method::HybridAgreement).unwrap();
        assert_eq!(json, "\"Hybrid (Agreement)\"");
        let back: Method = serde_json::from_str("\"Enhanced Rule-Based\"").unwrap();
        assert_eq!(back, Method::RuleBased);
        assert_eq!(Method::LlmOnly.to_string(), "LLM Only");
    }

    #[test]
    fn new_clamps_confidence() {
        assert_eq!(ClassificationResult::new("a", 1.7, Method::Llm).confidence, 1.0);
        assert_eq!(ClassificationResult::new("a", -0.2, Method::Llm).confidence, 0.0);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let r = ClassificationResult::new("spam", 0.5, Method::TfIdf);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["method"], "TF-IDF");
        assert!(v.get("reasoning").is_none());
        assert!(v.get("details").is_none());
    }

    #[test]
    fn failed_outcome_has_no_category() {
        let v = serde_json::to_value(Outcome::failed("bad categories")).unwrap();
        assert_eq!(v["error"], true);
        assert_eq!(v["message"], "bad categories");
        assert!(v.get("category").is_none());
    }

    #[test]
    fn classified_outcome_serializes_flat() {
        let r = ClassificationResult::new("ham", 0.25, Method::RuleBased).with_reasoning("x");
        let v = serde_json::to_value(Outcome::Classified(r)).unwrap();
        assert_eq!(v["category"], "ham");
        assert_eq!(v["reasoning"], "x");
    }
}
