//! Indicator engine: simple moving average and relative strength index.
//!
//! Both calculators are pure and never look ahead. Entries without enough
//! history are `None` rather than NaN, so every consumer has to check
//! definedness explicitly.

use crate::domain::market::{Candle, PriceSeries};
use serde::{Deserialize, Serialize};

/// RSI value used whenever the trailing average loss is exactly zero.
pub const RSI_NO_LOSS: f64 = 100.0;

/// Arithmetic mean of the trailing `window` closes ending at each index.
///
/// Yields `max(0, n - window + 1)` defined values. A zero window yields none.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                return None;
            }
            let slice = &closes[i + 1 - window..=i];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// Relative strength index over a trailing window of close-to-close changes.
///
/// Index `i` needs `window` deltas, so the first defined value sits at
/// `i == window`. Values are bounded to `[0, 100]`; a window with no losses
/// is exactly 100.
pub fn relative_strength_index(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() <= window {
        return out;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    for (i, slot) in out.iter_mut().enumerate().skip(window) {
        // deltas[k] is the change into close k + 1
        let trailing = &deltas[i - window..i];
        let avg_gain = trailing.iter().map(|d| d.max(0.0)).sum::<f64>() / window as f64;
        let avg_loss = trailing.iter().map(|d| (-d).max(0.0)).sum::<f64>() / window as f64;

        let rsi = if avg_loss == 0.0 {
            RSI_NO_LOSS
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
        *slot = Some(rsi.clamp(0.0, 100.0));
    }
    out
}

/// Window lengths for the two indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorWindows {
    pub sma: usize,
    pub rsi: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self { sma: 20, rsi: 14 }
    }
}

/// The latest bar for which both indicators are defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub sma: f64,
    pub rsi: f64,
}

/// A price series with SMA and RSI attached, aligned index for index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub windows: IndicatorWindows,
    pub candles: Vec<Candle>,
    pub sma: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn compute(series: &PriceSeries, windows: IndicatorWindows) -> Self {
        let closes = series.closes();
        Self {
            windows,
            candles: series.candles().to_vec(),
            sma: moving_average(&closes, windows.sma),
            rsi: relative_strength_index(&closes, windows.rsi),
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn row(&self, index: usize) -> Option<IndicatorRow> {
        let candle = self.candles.get(index)?;
        let sma = (*self.sma.get(index)?)?;
        let rsi = (*self.rsi.get(index)?)?;
        Some(IndicatorRow {
            timestamp: candle.timestamp,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            sma,
            rsi,
        })
    }

    /// Number of bars with both indicators defined.
    pub fn complete_rows(&self) -> usize {
        (0..self.len()).filter(|&i| self.row(i).is_some()).count()
    }

    pub fn latest_complete_row(&self) -> Option<IndicatorRow> {
        (0..self.len()).rev().find_map(|i| self.row(i))
    }
}
