use crate::domain::market::{SignalSource, Trend, TrendSignal};

/// Confidence reported for rule-based signals. Deliberately weak and not
/// calibrated against anything.
pub const RULE_BASED_CONFIDENCE: f64 = 0.55;

/// Trend from price position relative to its moving average.
pub fn rule_based_trend(latest_close: f64, latest_sma: f64) -> TrendSignal {
    let trend = if latest_close > latest_sma {
        Trend::Up
    } else {
        Trend::Down
    };
    TrendSignal {
        trend,
        confidence: RULE_BASED_CONFIDENCE,
        source: SignalSource::RuleBased,
    }
}
