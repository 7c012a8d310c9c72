pub mod history_loader;

pub use history_loader::{HistoryLoad, load_price_history};
