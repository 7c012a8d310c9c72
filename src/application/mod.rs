// Trend analysis pipeline
pub mod analysis_service;
pub mod fallback;
pub mod indicators;

// Feature engineering and the lazily trained classifier
pub mod ml;

// Candle retrieval policy
pub mod market_data;

// Natural-language summary of a report
pub mod explainer;
