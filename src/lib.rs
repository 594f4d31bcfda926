pub mod batch;
pub mod category;
pub mod cli;
pub mod config;
pub mod fusion;
pub mod remote;
pub mod result;
pub mod rules;
pub mod similarity;
pub mod training;
pub mod vectorize;

#[derive(Debug)]
pub enum HyclassError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    Category(String),
    Remote(String),
}

impl std::fmt::Display for HyclassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyclassError::Io(e) => write!(f, "io: {e}"),
            HyclassError::Json(e) => write!(f, "json: {e}"),
            HyclassError::Config(msg) => write!(f, "config: {msg}"),
            HyclassError::Category(msg) => write!(f, "categories: {msg}"),
            HyclassError::Remote(msg) => write!(f, "remote: {msg}"),
        }
    }
}

impl std::error::Error for HyclassError {}

impl From<std::io::Error> for HyclassError {
    fn from(e: std::io::Error) -> Self {
        HyclassError::Io(e)
    }
}

impl From<serde_json::Error> for HyclassError {
    fn from(e: serde_json::Error) -> Self {
        HyclassError::Json(e)
    }
}

/// Base directory for user-level files (`~/.hyclass`).
pub fn hyclass_dir() -> Option<std::path::PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| std::path::PathBuf::from(h).join(".hyclass"))
}
