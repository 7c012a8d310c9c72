use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use trendscope::application::analysis_service::TrendAnalysisService;
use trendscope::application::explainer::explain;
use trendscope::application::fallback::rule_based_trend;
use trendscope::application::indicators::{IndicatorFrame, IndicatorWindows};
use trendscope::application::market_data::load_price_history;
use trendscope::application::ml::TrendClassifierService;
use trendscope::domain::errors::AnalysisError;
use trendscope::domain::market::{
    AnalysisMode, HistoryRange, Prediction, PriceSeries, SignalSource, Trend,
};
use trendscope::domain::ports::{MarketDataSource, ModelStore};
use trendscope::infrastructure::InMemoryModelStore;
use trendscope::infrastructure::market_data::csv::parse_candles;

fn five_bars() -> PriceSeries {
    PriceSeries::from_closes(1_700_000_000, 300, &[101.0, 102.5, 101.8, 103.2, 104.0]).unwrap()
}

#[test]
fn test_five_rows_decline_without_training() {
    let store = Arc::new(InMemoryModelStore::new());
    let classifier = TrendClassifierService::new(store.clone());

    for windows in [IndicatorWindows::default(), IndicatorWindows { sma: 2, rsi: 2 }] {
        let frame = IndicatorFrame::compute(&five_bars(), windows);
        assert_eq!(classifier.predict_trend(&frame).unwrap(), Prediction::Declined);
    }
    assert!(!store.exists());
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_decline_routes_to_rule_based_signal() {
    let service = TrendAnalysisService::new(
        Arc::new(InMemoryModelStore::new()),
        IndicatorWindows { sma: 2, rsi: 2 },
    );
    let report = service.analyze("TEST", &five_bars()).unwrap();

    assert!(report.used_fallback());
    assert_eq!(report.signal.source, SignalSource::RuleBased);
    assert_eq!(report.signal.confidence, 0.55);
    // 104.0 against (103.2 + 104.0) / 2
    assert_eq!(report.signal.trend, Trend::Up);

    let text = explain(&report);
    assert!(text.contains("rule-based"));
    assert!(text.contains("2-period moving average"));
}

#[test]
fn test_rule_based_examples() {
    let up = rule_based_trend(105.0, 100.0);
    assert_eq!((up.trend, up.confidence), (Trend::Up, 0.55));

    let down = rule_based_trend(95.0, 100.0);
    assert_eq!((down.trend, down.confidence), (Trend::Down, 0.55));
}

#[test]
fn test_no_complete_indicator_row_is_an_error() {
    let service = TrendAnalysisService::new(
        Arc::new(InMemoryModelStore::new()),
        IndicatorWindows::default(),
    );
    let err = service.analyze("TEST", &five_bars()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InsufficientHistory { rows: 5, .. })
    ));
}

#[test]
fn test_csv_rows_flow_through_analysis() {
    let data = "timestamp,open,high,low,close,volume\n\
                2024-03-01 14:30:00,10,10.4,9.9,10.2,500\n\
                2024-03-01 14:35:00,10.2,10.5,10.1,10.4,420\n\
                2024-03-01 14:40:00,10.4,10.4,10.0,10.1,610\n\
                2024-03-01 14:45:00,10.1,10.3,9.8,9.9,380\n";
    let series = parse_candles(data.as_bytes()).unwrap();
    let service = TrendAnalysisService::new(
        Arc::new(InMemoryModelStore::new()),
        IndicatorWindows { sma: 3, rsi: 2 },
    );

    let report = service.analyze("CSV", &series).unwrap();
    assert!(report.used_fallback());
    assert_eq!(report.signal.trend, Trend::Down);
}

/// Returns an empty one-day window, like a closed market, and five bars otherwise.
struct ClosedMarket {
    calls: AtomicUsize,
}

#[async_trait]
impl MarketDataSource for ClosedMarket {
    async fn fetch_candles(
        &self,
        _symbol: &str,
        range: HistoryRange,
        _interval: &str,
    ) -> Result<PriceSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match range {
            HistoryRange::OneDay => PriceSeries::default(),
            HistoryRange::FiveDays => five_bars(),
        })
    }
}

#[tokio::test]
async fn test_intraday_history_widens_then_falls_back() {
    let source = ClosedMarket {
        calls: AtomicUsize::new(0),
    };
    let load = load_price_history(&source, "MSFT", AnalysisMode::Intraday, "5m")
        .await
        .unwrap();

    assert!(load.used_fallback_range);
    assert_eq!(load.range, HistoryRange::FiveDays);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);

    let service = TrendAnalysisService::new(
        Arc::new(InMemoryModelStore::new()),
        IndicatorWindows { sma: 2, rsi: 2 },
    );
    let report = service.analyze("MSFT", &load.series).unwrap();
    assert!(report.used_fallback());
}
