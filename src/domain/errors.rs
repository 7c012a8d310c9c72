use thiserror::Error;

/// Errors raised while building a price series
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("Timestamps must be strictly increasing: index {index} has {current} after {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Non-finite price in bar at {timestamp}")]
    NonFinitePrice { timestamp: i64 },
}

/// Errors related to fitting or scoring the trend model
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("Feature/label length mismatch: {features} rows vs {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("Dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Fitted model has non-finite parameters")]
    NonFiniteModel,
}

/// Errors returned by the analysis pipeline itself
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error(
        "Not enough data after applying indicators ({rows} bars, SMA window {sma_window}, RSI window {rsi_window})"
    )]
    InsufficientHistory {
        rows: usize,
        sma_window: usize,
        rsi_window: usize,
    },
}
