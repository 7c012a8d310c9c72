// Candles, series and trend vocabulary
pub mod market;

// Features, scaler and classifier
pub mod ml;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
