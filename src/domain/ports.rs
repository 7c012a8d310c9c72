use crate::domain::market::{HistoryRange, PriceSeries};
use crate::domain::ml::{ModelArtifact, TrainingSet};
use anyhow::Result;
use async_trait::async_trait;

/// Durable home of the single trained model artifact.
///
/// The artifact is written once and then only read: nothing here retrains
/// an artifact that already exists.
pub trait ModelStore: Send + Sync {
    /// True only when a complete artifact (classifier and scaler) is stored.
    fn exists(&self) -> bool;

    fn load(&self) -> Result<ModelArtifact>;

    fn save(&self, artifact: &ModelArtifact) -> Result<()>;

    /// Fits a fresh artifact on `set` and persists it before returning it.
    fn train_and_save(&self, set: &TrainingSet) -> Result<ModelArtifact> {
        let artifact = ModelArtifact::fit(set)?;
        self.save(&artifact)?;
        Ok(artifact)
    }
}

/// Source of historical candles for one symbol.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_candles(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: &str,
    ) -> Result<PriceSeries>;
}
