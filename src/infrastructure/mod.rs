pub mod market_data;
pub mod model_store;

pub use market_data::{CsvPriceSource, YahooFinanceClient};
pub use model_store::{FileModelStore, InMemoryModelStore};
