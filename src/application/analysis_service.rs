//! End-to-end trend analysis for one symbol.
//!
//! Indicators first, then the learned classifier, then the rule-based
//! fallback if the classifier declines. The report carries everything the
//! explanation and charting layers consume.

use crate::application::fallback::rule_based_trend;
use crate::application::indicators::{IndicatorFrame, IndicatorRow, IndicatorWindows};
use crate::application::ml::TrendClassifierService;
use crate::domain::errors::AnalysisError;
use crate::domain::market::{Prediction, PriceSeries, SignalSource, TrendSignal};
use crate::domain::ports::ModelStore;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub signal: TrendSignal,
    pub windows: IndicatorWindows,
    /// Most recent bar with both indicators defined.
    pub latest: IndicatorRow,
    pub frame: IndicatorFrame,
}

impl AnalysisReport {
    pub fn used_fallback(&self) -> bool {
        self.signal.source == SignalSource::RuleBased
    }
}

pub struct TrendAnalysisService {
    classifier: TrendClassifierService,
    windows: IndicatorWindows,
}

impl TrendAnalysisService {
    pub fn new(store: Arc<dyn ModelStore>, windows: IndicatorWindows) -> Self {
        Self {
            classifier: TrendClassifierService::new(store),
            windows,
        }
    }

    pub fn classifier(&self) -> &TrendClassifierService {
        &self.classifier
    }

    pub fn analyze(&self, symbol: &str, series: &PriceSeries) -> Result<AnalysisReport> {
        let frame = IndicatorFrame::compute(series, self.windows);
        let latest = frame
            .latest_complete_row()
            .ok_or(AnalysisError::InsufficientHistory {
                rows: series.len(),
                sma_window: self.windows.sma,
                rsi_window: self.windows.rsi,
            })?;

        let signal = match self.classifier.predict_trend(&frame)? {
            Prediction::Predicted { trend, confidence } => TrendSignal {
                trend,
                confidence,
                source: SignalSource::Model,
            },
            Prediction::Declined => {
                warn!(
                    "{}: model did not have enough data, using rule-based trend",
                    symbol
                );
                rule_based_trend(latest.close, latest.sma)
            }
        };

        info!(
            "{}: {} trend (confidence {:.2}, {})",
            symbol, signal.trend, signal.confidence, signal.source
        );

        Ok(AnalysisReport {
            symbol: symbol.to_string(),
            signal,
            windows: self.windows,
            latest,
            frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Trend;
    use crate::infrastructure::model_store::InMemoryModelStore;

    fn service(windows: IndicatorWindows) -> TrendAnalysisService {
        TrendAnalysisService::new(Arc::new(InMemoryModelStore::new()), windows)
    }

    #[test]
    fn test_empty_series_is_insufficient_history() {
        let err = service(IndicatorWindows::default())
            .analyze("MSFT", &PriceSeries::default())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::InsufficientHistory {
                rows: 0,
                sma_window: 20,
                rsi_window: 14
            })
        );
    }

    #[test]
    fn test_short_series_falls_back_to_rules() {
        let closes = [100.0, 101.0, 99.0, 102.0, 104.0, 103.0, 106.0];
        let series = PriceSeries::from_closes(0, 300, &closes).unwrap();
        let report = service(IndicatorWindows { sma: 3, rsi: 3 })
            .analyze("AAPL", &series)
            .unwrap();

        assert!(report.used_fallback());
        assert_eq!(report.signal.confidence, 0.55);
        // close 106 vs sma (104 + 103 + 106) / 3
        assert_eq!(report.signal.trend, Trend::Up);
        assert_eq!(report.latest.close, 106.0);
    }

    #[test]
    fn test_long_series_uses_model() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 50.0 + (i as f64 * 1.3).cos() * 2.0 + i as f64 * 0.2)
            .collect();
        let series = PriceSeries::from_closes(0, 300, &closes).unwrap();
        let report = service(IndicatorWindows { sma: 10, rsi: 7 })
            .analyze("BTC-USD", &series)
            .unwrap();

        assert_eq!(report.signal.source, SignalSource::Model);
        assert_eq!(report.frame.len(), 60);
    }
}
