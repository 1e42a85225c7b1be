// In-memory price history, keyed by symbol
use super::PriceHistoryProvider;
use crate::error::EngineError;
use shared::models::{PriceBar, PriceSeries};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InMemoryHistoryProvider {
    data: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryHistoryProvider {
    pub fn new() -> Self {
        InMemoryHistoryProvider {
            data: HashMap::new(),
        }
    }

    /// Merges bars for `symbol`, keeping them sorted and unique by timestamp.
    pub fn add_bars(&mut self, symbol: &str, new_bars: Vec<PriceBar>) {
        let bars = self.data.entry(symbol.to_string()).or_default();
        bars.extend(new_bars);
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
    }

}

impl PriceHistoryProvider for InMemoryHistoryProvider {
    fn history(&self, ticker: &str, lookback: usize) -> Result<PriceSeries, EngineError> {
        let bars = self
            .data
            .get(ticker)
            .filter(|bars| !bars.is_empty())
            .ok_or_else(|| {
                EngineError::MarketDataError(format!("Price history for '{}' not found", ticker))
            })?;
        let series = PriceSeries::new(ticker, bars.clone())?;
        Ok(series.tail(lookback))
    }
}
