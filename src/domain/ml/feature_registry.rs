use serde::{Deserialize, Serialize};

/// Ordered list of feature names.
/// Persisted models depend on this order; changing it invalidates them.
pub const FEATURE_NAMES: &[&str] = &["return", "sma_diff", "rsi"];

/// Classifier input for a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Fractional close-to-close change.
    pub ret: f64,
    /// Close minus SMA, in price units.
    pub sma_diff: f64,
    pub rsi: f64,
}

impl FeatureRow {
    pub fn new(ret: f64, sma_diff: f64, rsi: f64) -> Self {
        Self { ret, sma_diff, rsi }
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![self.ret, self.sma_diff, self.rsi]
    }
}

/// Rows aligned with labels, ready for fitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub timestamps: Vec<i64>,
    pub features: Vec<FeatureRow>,
    /// 1 when the next close is strictly higher, else 0.
    pub labels: Vec<u8>,
    /// Features at the most recent timestamp. Unlabelled, so never trained on.
    pub latest: Option<FeatureRow>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.features.iter().map(FeatureRow::to_vector).collect()
    }
}
