use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the next close relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Maps a class-1 probability onto a direction. Ties go to `Down`.
    pub fn from_probability(prob_up: f64) -> Self {
        if prob_up > 0.5 { Trend::Up } else { Trend::Down }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "UP"),
            Trend::Down => write!(f, "DOWN"),
        }
    }
}

/// Outcome of the learned classifier.
///
/// `Declined` means there were not enough labelled rows to say anything;
/// it is a normal answer, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Prediction {
    Declined,
    Predicted { trend: Trend, confidence: f64 },
}

impl Prediction {
    pub fn is_declined(&self) -> bool {
        matches!(self, Prediction::Declined)
    }
}

/// Which policy produced a trend signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Model,
    RuleBased,
}

impl fmt::Display for SignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalSource::Model => write!(f, "model"),
            SignalSource::RuleBased => write!(f, "rule-based"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
    pub trend: Trend,
    pub confidence: f64,
    pub source: SignalSource,
}
