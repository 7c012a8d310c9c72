//! Model artifact persisted as two JSON files under a storage directory.
//!
//! `trend_model.json` holds the classifier and `scaler.json` the fitted
//! scaler. There is no versioning or checksum: whichever pair was written
//! last is the artifact. If either file is missing the store reports no
//! artifact at all, which forces a retrain.

use crate::domain::ml::ModelArtifact;
use crate::domain::ml::logistic::LogisticRegression;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::ports::ModelStore;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MODEL_FILE: &str = "trend_model.json";
pub const SCALER_FILE: &str = "scaler.json";

pub struct FileModelStore {
    dir: PathBuf,
}

impl FileModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;

    // Atomic write: write to temp file then rename
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).with_context(|| format!("Failed to write {:?}", temp_path))?;
    fs::rename(&temp_path, path).with_context(|| format!("Failed to rename to {:?}", path))?;
    Ok(())
}

impl ModelStore for FileModelStore {
    fn exists(&self) -> bool {
        self.model_path().exists() && self.scaler_path().exists()
    }

    fn load(&self) -> Result<ModelArtifact> {
        let classifier: LogisticRegression = read_json(&self.model_path())?;
        let scaler: StandardScaler = read_json(&self.scaler_path())?;
        info!("Loaded model artifact from {:?}", self.dir);
        Ok(ModelArtifact { scaler, classifier })
    }

    fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create model directory {:?}", self.dir))?;
        write_json(&self.model_path(), &artifact.classifier)?;
        write_json(&self.scaler_path(), &artifact.scaler)?;
        info!("Saved model artifact to {:?}", self.dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::{FeatureRow, TrainingSet};

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trendscope-{}-{}", tag, uuid::Uuid::new_v4()))
    }

    fn artifact() -> ModelArtifact {
        let features: Vec<FeatureRow> = (0..10)
            .map(|i| FeatureRow::new(0.001 * i as f64, i as f64, 50.0 + i as f64))
            .collect();
        let set = TrainingSet {
            timestamps: (0..10).collect(),
            labels: (0..10).map(|i| u8::from(i % 3 == 0)).collect(),
            features,
            latest: None,
        };
        ModelArtifact::fit(&set).unwrap()
    }

    #[test]
    fn test_save_creates_directory_and_files() {
        let dir = temp_dir("save").join("nested");
        let store = FileModelStore::new(&dir);
        assert!(!store.exists());

        store.save(&artifact()).unwrap();
        assert!(store.model_path().is_file());
        assert!(store.scaler_path().is_file());
        assert!(store.exists());

        fs::remove_dir_all(dir.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_returns_saved_artifact() {
        let dir = temp_dir("load");
        let store = FileModelStore::new(&dir);
        let original = artifact();

        store.save(&original).unwrap();
        assert_eq!(store.load().unwrap(), original);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_scaler_means_no_artifact() {
        let dir = temp_dir("partial");
        let store = FileModelStore::new(&dir);
        store.save(&artifact()).unwrap();

        fs::remove_file(store.scaler_path()).unwrap();
        assert!(!store.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        let store = FileModelStore::new(&dir);
        store.save(&artifact()).unwrap();

        fs::write(store.model_path(), "not json").unwrap();
        assert!(store.load().is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
