use super::feature_registry::{FEATURE_NAMES, FeatureRow, TrainingSet};
use super::logistic::{LogisticRegression, LogisticRegressionParameters};
use super::scaler::StandardScaler;
use crate::domain::errors::ModelError;
use serde::{Deserialize, Serialize};

/// A fitted scaler together with the classifier trained on its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub scaler: StandardScaler,
    pub classifier: LogisticRegression,
}

impl ModelArtifact {
    pub fn fit(set: &TrainingSet) -> Result<Self, ModelError> {
        if set.features.len() != set.labels.len() {
            return Err(ModelError::LengthMismatch {
                features: set.features.len(),
                labels: set.labels.len(),
            });
        }
        let rows = set.matrix();
        let scaler = StandardScaler::fit(&rows)?;
        let scaled = scaler.transform(&rows)?;
        let classifier =
            LogisticRegression::fit(&scaled, &set.labels, LogisticRegressionParameters::default())?;
        Ok(Self { scaler, classifier })
    }

    /// Probability that the bar after `row` closes higher.
    pub fn predict_proba(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let scaled = self.scaler.transform_row(&row.to_vector())?;
        self.classifier.predict_proba(&scaled)
    }

    pub fn feature_count(&self) -> usize {
        debug_assert_eq!(self.scaler.width(), FEATURE_NAMES.len());
        self.scaler.width()
    }
}
