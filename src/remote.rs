//! Remote LLM classifier adapter.
//!
//! One blocking request per call, no retries. Any failure (transport,
//! status, missing or malformed JSON, unknown category) is reported as
//! `HyclassError::Remote` so callers can fall back to the rule scorer.

use crate::HyclassError;
use crate::category::CategoryList;
use crate::config::{Provider, RemoteConfig};
use crate::result::{ClassificationResult, Method};

const PROMPT_TEMPLATE: &str = r#"You are a precise text classifier. Classify the following text into exactly ONE of these categories: {CATEGORIES}.

Text to classify: "{TEXT}"

Respond ONLY with a JSON object in this exact format:
{
  "category": "the_chosen_category",
  "confidence": 0.95,
  "reasoning": "brief explanation"
}"#;

/// Something that can ask a hosted model for a category.
pub trait RemoteClassifier {
    fn classify(
        &self,
        text: &str,
        categories: &CategoryList,
    ) -> Result<ClassificationResult, HyclassError>;
}

/// Build the classifier described by `config`.
///
/// Disabled config or a missing API key yields a classifier that always
/// reports unavailability.
pub fn from_config(config: &RemoteConfig) -> Box<dyn RemoteClassifier> {
    if !config.enabled {
        return Box::new(Unavailable::new("remote classifier disabled"));
    }
    let api_key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty());
    match (config.provider, api_key) {
        (Provider::Gemini, None) => Box::new(Unavailable::new(format!(
            "{} is not set",
            config.api_key_env
        ))),
        (_, key) => Box::new(HttpClassifier::new(config.clone(), key)),
    }
}

/// Always fails; used when no remote model is configured.
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl RemoteClassifier for Unavailable {
    fn classify(&self, _text: &str, _categories: &CategoryList) -> Result<ClassificationResult, HyclassError> {
        Err(HyclassError::Remote(self.reason.clone()))
    }
}

/// Gemini `generateContent` or OpenAI-compatible chat completions over HTTP.
pub struct HttpClassifier {
    config: RemoteConfig,
    api_key: Option<String>,
}

impl HttpClassifier {
    pub fn new(config: RemoteConfig, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        match self.config.provider {
            Provider::Gemini => serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": self.config.temperature,
                    "maxOutputTokens": self.config.max_output_tokens,
                },
            }),
            Provider::Openai => serde_json::json!({
                "model": self.config.model,
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": self.config.temperature,
                "max_tokens": self.config.max_output_tokens,
            }),
        }
    }

    fn send(&self, body: &serde_json::Value) -> Result<serde_json::Value, HyclassError> {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(std::time::Duration::from_secs(self.config.timeout_secs)))
                .build(),
        );

        let endpoint = self.config.endpoint.trim_end_matches('/');
        let request = match self.config.provider {
            Provider::Gemini => {
                let url = format!("{endpoint}/models/{}:generateContent", self.config.model);
                agent
                    .post(&url)
                    .query("key", self.api_key.as_deref().unwrap_or_default())
            }
            Provider::Openai => {
                let req = agent.post(endpoint);
                match &self.api_key {
                    Some(key) => req.header("Authorization", format!("Bearer {key}")),
                    None => req,
                }
            }
        };

        request
            .send_json(body)
            .map_err(|e| HyclassError::Remote(format!("request: {e}")))?
            .body_mut()
            .read_json()
            .map_err(|e| HyclassError::Remote(format!("response: {e}")))
    }
}

impl RemoteClassifier for HttpClassifier {
    fn classify(
        &self,
        text: &str,
        categories: &CategoryList,
    ) -> Result<ClassificationResult, HyclassError> {
        let prompt = build_prompt(text, categories);
        let resp = self.send(&self.request_body(&prompt))?;
        let answer = answer_text(self.config.provider, &resp)?;
        parse_verdict(answer, categories)
    }
}

pub fn build_prompt(text: &str, categories: &CategoryList) -> String {
    PROMPT_TEMPLATE
        .replace("{CATEGORIES}", &categories.joined())
        .replace("{TEXT}", text)
}

/// Pull the model's answer text out of the provider envelope.
fn answer_text(provider: Provider, resp: &serde_json::Value) -> Result<&str, HyclassError> {
    let pointer = match provider {
        Provider::Gemini => "/candidates/0/content/parts/0/text",
        Provider::Openai => "/choices/0/message/content",
    };
    resp.pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| HyclassError::Remote("no answer in response".into()))
}

/// First balanced `{...}` substring that parses as a JSON object.
///
/// Braces inside JSON strings are ignored, so prose before or after the
/// object (or fenced code blocks) is tolerated.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        if let Some(close) = matching_brace(&bytes[open..]) {
            let candidate = &text[open..open + close + 1];
            if serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(candidate).is_ok() {
                return Some(candidate);
            }
        }
        start = open + 1;
    }
    None
}

/// Offset of the brace closing the one at `bytes[0]`.
fn matching_brace(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Turn the model's answer into a result whose category is in `categories`.
pub fn parse_verdict(answer: &str, categories: &CategoryList) -> Result<ClassificationResult, HyclassError> {
    let raw = extract_json_object(answer)
        .ok_or_else(|| HyclassError::Remote("no JSON object in answer".into()))?;
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| HyclassError::Remote(format!("answer parse: {e}")))?;

    let label = value
        .get("category")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| HyclassError::Remote("answer missing category".into()))?;
    let confidence = value
        .get("confidence")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| HyclassError::Remote("answer missing confidence".into()))?;
    let reasoning = value
        .get("reasoning")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| HyclassError::Remote("answer missing reasoning".into()))?;

    let category = categories
        .find_ignore_case(label)
        .ok_or_else(|| HyclassError::Remote(format!("answer category {label:?} not in list")))?;

    Ok(ClassificationResult::new(category, confidence, Method::Llm).with_reasoning(reasoning))
}
