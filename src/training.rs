//! Training-set file: a pretty-printed JSON array of `{text, category}`.

use crate::HyclassError;
use crate::similarity::TrainingSet;
use std::path::{Path, PathBuf};

pub fn default_training_path() -> PathBuf {
    crate::hyclass_dir()
        .map(|d| d.join("training.json"))
        .unwrap_or_else(|| PathBuf::from("training.json"))
}

/// Read the set from `path`. A missing file is an empty set.
pub fn load_training(path: &Path) -> Result<TrainingSet, HyclassError> {
    if !path.exists() {
        return Ok(TrainingSet::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(TrainingSet::new());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn save_training(path: &Path, training: &TrainingSet) -> Result<(), HyclassError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(training)?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_set() {
        let dir = TempDir::new().unwrap();
        let set = load_training(&dir.path().join("nope.json")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("training.json");

        let mut set = TrainingSet::new();
        set.add("great stuff", "positive").unwrap();
        set.add("awful stuff", "negative").unwrap();
        save_training(&path, &set).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));

        let loaded = load_training(&path).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.examples()[1].category, "negative");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("training.json");
        std::fs::write(&path, "{not an array").unwrap();
        assert!(matches!(load_training(&path), Err(HyclassError::Json(_))));
    }
}
