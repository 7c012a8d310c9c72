use crate::domain::ml::ModelArtifact;
use crate::domain::ports::ModelStore;
use anyhow::{Result, anyhow};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-local model store.
/// Suitable for testing and for embedding without touching the filesystem.
#[derive(Default)]
pub struct InMemoryModelStore {
    artifact: RwLock<Option<ModelArtifact>>,
    saves: AtomicUsize,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(artifact: ModelArtifact) -> Self {
        Self {
            artifact: RwLock::new(Some(artifact)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times an artifact has been written.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clear(&self) -> Result<()> {
        *self
            .artifact
            .write()
            .map_err(|_| anyhow!("Model store lock poisoned"))? = None;
        Ok(())
    }
}

impl ModelStore for InMemoryModelStore {
    fn exists(&self) -> bool {
        self.artifact.read().map(|a| a.is_some()).unwrap_or(false)
    }

    fn load(&self) -> Result<ModelArtifact> {
        self.artifact
            .read()
            .map_err(|_| anyhow!("Model store lock poisoned"))?
            .clone()
            .ok_or_else(|| anyhow!("No model artifact stored"))
    }

    fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        *self
            .artifact
            .write()
            .map_err(|_| anyhow!("Model store lock poisoned"))? = Some(artifact.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
