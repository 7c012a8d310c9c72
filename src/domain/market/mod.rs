pub mod candle;
pub mod history;
pub mod trend;

pub use candle::{Candle, PriceSeries};
pub use history::{AnalysisMode, HistoryRange};
pub use trend::{Prediction, SignalSource, Trend, TrendSignal};
