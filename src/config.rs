use crate::HyclassError;
use crate::category::CategoryList;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HyclassConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Comma-separated category labels.
    #[serde(default = "default_categories")]
    pub categories: String,
    /// Also consult the TF-IDF matcher when training examples exist.
    #[serde(default = "default_true")]
    pub use_hybrid: bool,
    /// LLM confidence above which its answer is trusted (strict `>`).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            use_hybrid: true,
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Openai,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: Provider::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_categories() -> String {
    "positive, negative, neutral".into()
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    500
}

/// Load config from HYCLASS_CONFIG env var, ~/.hyclass/config.toml, or defaults.
pub fn load_config() -> Result<HyclassConfig, HyclassError> {
    match config_path() {
        Some(p) if p.exists() => load_config_from(&p),
        _ => Ok(HyclassConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<HyclassConfig, HyclassError> {
    let content = std::fs::read_to_string(path)?;
    let config: HyclassConfig = toml::from_str(&content)
        .map_err(|e| HyclassError::Config(format!("{}: {e}", path.display())))?;
    validate_config(&config)
        .map_err(|e| HyclassError::Config(format!("{}: {e}", path.display())))?;
    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("HYCLASS_CONFIG") {
        return Some(PathBuf::from(p));
    }
    crate::hyclass_dir().map(|d| d.join("config.toml"))
}

fn validate_config(config: &HyclassConfig) -> Result<(), HyclassError> {
    let threshold = config.classifier.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(HyclassError::Config(format!(
            "confidence_threshold {threshold} outside [0, 1]"
        )));
    }
    CategoryList::parse(&config.classifier.categories)?;
    if config.remote.timeout_secs == 0 {
        return Err(HyclassError::Config("remote.timeout_secs must be > 0".into()));
    }
    Ok(())
}
