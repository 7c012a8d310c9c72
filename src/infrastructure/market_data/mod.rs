pub mod csv;
pub mod yahoo;

pub use self::csv::{CsvPriceSource, load_candles_from_csv};
pub use self::yahoo::YahooFinanceClient;
