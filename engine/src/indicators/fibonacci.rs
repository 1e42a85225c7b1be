// Fibonacci retracement levels over the full close range
use super::closes;
use crate::error::EngineError;
use serde::Serialize;
use shared::models::{FibRatio, LevelPosition, PriceBar};
use std::collections::BTreeMap;

pub struct FibonacciRetracement;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub high: f64,
    pub low: f64,
    /// Indexed by `FibRatio as usize`, in `FibRatio::ALL` order.
    levels: [f64; 5],
}

impl FibonacciLevels {
    /// Levels `high - ratio * (high - low)` for every standard ratio.
    pub fn from_range(high: f64, low: f64) -> Self {
        let diff = high - low;
        let levels = FibRatio::ALL.map(|ratio| high - ratio.value() * diff);
        Self { high, low, levels }
    }

    pub fn level(&self, ratio: FibRatio) -> f64 {
        self.levels[ratio as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FibRatio, f64)> + '_ {
        FibRatio::ALL.into_iter().map(|ratio| (ratio, self.level(ratio)))
    }

    pub fn classify(&self, price: f64) -> BTreeMap<FibRatio, LevelPosition> {
        self.iter()
            .map(|(ratio, level)| (ratio, LevelPosition::classify(price, level)))
            .collect()
    }
}

impl FibonacciRetracement {
    pub fn calculate(data: &[PriceBar]) -> Result<FibonacciLevels, EngineError> {
        Self::calculate_values(&closes(data))
    }

    pub fn calculate_values(values: &[f64]) -> Result<FibonacciLevels, EngineError> {
        if values.is_empty() {
            return Err(EngineError::insufficient("Fibonacci", 1, 0));
        }
        let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let low = values.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(FibonacciLevels::from_range(high, low))
    }
}
