use crate::domain::errors::SeriesError;
use serde::{Deserialize, Serialize};

/// One OHLC bar. Timestamps are unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Flat bar where every price equals `close`.
    pub fn flat(timestamp: i64, close: f64) -> Self {
        Self::new(timestamp, close, close, close, close, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

impl ta::Open for Candle {
    fn open(&self) -> f64 {
        self.open
    }
}

impl ta::High for Candle {
    fn high(&self) -> f64 {
        self.high
    }
}

impl ta::Low for Candle {
    fn low(&self) -> f64 {
        self.low
    }
}

impl ta::Close for Candle {
    fn close(&self) -> f64 {
        self.close
    }
}

impl ta::Volume for Candle {
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Ordered candle history for a single symbol.
///
/// Timestamps are strictly increasing and every price is finite. An empty
/// series is valid; downstream consumers decline on it rather than fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        for (index, candle) in candles.iter().enumerate() {
            if !candle.is_finite() {
                return Err(SeriesError::NonFinitePrice {
                    timestamp: candle.timestamp,
                });
            }
            if index > 0 {
                let previous = candles[index - 1].timestamp;
                if candle.timestamp <= previous {
                    return Err(SeriesError::NonIncreasingTimestamp {
                        index,
                        previous,
                        current: candle.timestamp,
                    });
                }
            }
        }
        Ok(Self { candles })
    }

    /// Builds a series from closing prices only, one bar per `step_secs`.
    pub fn from_closes(start: i64, step_secs: i64, closes: &[f64]) -> Result<Self, SeriesError> {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::flat(start + i as i64 * step_secs, close))
            .collect();
        Self::new(candles)
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(ta::Close::close).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}
