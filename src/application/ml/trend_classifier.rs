use super::feature_builder::build_training_set;
use crate::application::indicators::IndicatorFrame;
use crate::domain::market::{Prediction, Trend};
use crate::domain::ml::{ModelArtifact, TrainingSet};
use crate::domain::ports::ModelStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Fewer labelled rows than this and the classifier declines.
pub const MIN_TRAINING_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    /// No complete artifact in the store; the next eligible call trains.
    Untrained,
    /// An artifact is stored and will be reused as-is.
    Trained,
}

/// Learned next-bar direction, backed by a lazily trained artifact.
///
/// The artifact is trained only when the store has none. Once stored it is
/// reused for every later call regardless of how much new data arrives;
/// deleting it from the store is the only way to force a retrain.
pub struct TrendClassifierService {
    store: Arc<dyn ModelStore>,
}

impl TrendClassifierService {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self { store }
    }

    pub fn state(&self) -> ClassifierState {
        if self.store.exists() {
            ClassifierState::Trained
        } else {
            ClassifierState::Untrained
        }
    }

    pub fn predict_trend(&self, frame: &IndicatorFrame) -> Result<Prediction> {
        let set = build_training_set(frame);
        if set.len() < MIN_TRAINING_ROWS {
            info!(
                "Declining prediction: {} usable rows (< {})",
                set.len(),
                MIN_TRAINING_ROWS
            );
            return Ok(Prediction::Declined);
        }
        let Some(latest) = set.latest else {
            return Ok(Prediction::Declined);
        };

        let artifact = self.obtain_artifact(&set)?;
        let prob_up = artifact
            .predict_proba(&latest)
            .context("Failed to score latest feature row")?;
        let trend = Trend::from_probability(prob_up);

        debug!("Latest row {:?} scored p(up)={:.4}", latest, prob_up);
        Ok(Prediction::Predicted {
            trend,
            confidence: prob_up,
        })
    }

    fn obtain_artifact(&self, set: &TrainingSet) -> Result<ModelArtifact> {
        match self.state() {
            ClassifierState::Trained => {
                debug!("Reusing stored model artifact");
                self.store.load().context("Failed to load model artifact")
            }
            ClassifierState::Untrained => {
                info!("No stored model artifact; training on {} rows", set.len());
                self.store
                    .train_and_save(set)
                    .context("Failed to train and persist model artifact")
            }
        }
    }
}
