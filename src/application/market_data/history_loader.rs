use crate::domain::market::{AnalysisMode, HistoryRange, PriceSeries};
use crate::domain::ports::MarketDataSource;
use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct HistoryLoad {
    pub series: PriceSeries,
    pub range: HistoryRange,
    /// Intraday request came back empty and was widened to five days.
    pub used_fallback_range: bool,
}

/// Fetches candles for `symbol` according to the analysis mode.
///
/// Outside market hours the one-day intraday window is often empty; in that
/// case the request is repeated once with the five-day range.
pub async fn load_price_history(
    source: &dyn MarketDataSource,
    symbol: &str,
    mode: AnalysisMode,
    interval: &str,
) -> Result<HistoryLoad> {
    let range = mode.history_range();
    let series = source
        .fetch_candles(symbol, range, interval)
        .await
        .with_context(|| format!("Failed to fetch {} candles for {}", range, symbol))?;
    info!("Fetched {} bars for {} ({}, {})", series.len(), symbol, range, interval);

    if !series.is_empty() || range != HistoryRange::OneDay {
        return Ok(HistoryLoad {
            series,
            range,
            used_fallback_range: false,
        });
    }

    warn!(
        "No intraday data for {} in {}; widening to {}",
        symbol,
        range,
        HistoryRange::FiveDays
    );
    let series = source
        .fetch_candles(symbol, HistoryRange::FiveDays, interval)
        .await
        .with_context(|| format!("Failed to fetch fallback candles for {}", symbol))?;

    Ok(HistoryLoad {
        series,
        range: HistoryRange::FiveDays,
        used_fallback_range: true,
    })
}
