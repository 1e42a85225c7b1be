// Technical indicators module
pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod rsi;
pub mod sma;

pub use bollinger::{BandSeries, BollingerBands};
pub use ema::Ema;
pub use fibonacci::{FibonacciLevels, FibonacciRetracement};
pub use rsi::Rsi;
pub use sma::Sma;

use crate::error::EngineError;
use serde::Serialize;
use serde_json::Value;
use shared::models::PriceBar;

/// A derived series aligned index-for-index with the bars it came from.
/// Positions without enough history are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the latest position, if defined there.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

impl From<Vec<Option<f64>>> for IndicatorSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}

// Common trait for single-output indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[PriceBar]) -> Result<IndicatorSeries, EngineError>;
}

pub(crate) fn closes(data: &[PriceBar]) -> Vec<f64> {
    data.iter().map(|b| b.close).collect()
}
