// Sources of historical bars. The analysis core only sees the trait.
pub mod csv_parser;
pub mod market_data;

pub use csv_parser::CsvHistoryProvider;
pub use market_data::InMemoryHistoryProvider;

use crate::error::EngineError;
use shared::models::PriceSeries;

pub trait PriceHistoryProvider: Send + Sync {
    /// Ascending bars for `ticker`, at most the most recent `lookback` of them.
    fn history(&self, ticker: &str, lookback: usize) -> Result<PriceSeries, EngineError>;
}
