use super::SignalOutcome;
use crate::indicators::FibonacciLevels;
use serde::Serialize;
use shared::models::{FibRatio, LevelPosition};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct FibonacciAnalyzer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FibonacciOutcome {
    pub outcome: SignalOutcome,
    pub positions: BTreeMap<FibRatio, LevelPosition>,
}

impl FibonacciAnalyzer {
    /// Sell above the shallowest retracement, buy below the deepest one.
    pub fn analyze(&self, close: f64, levels: &FibonacciLevels) -> FibonacciOutcome {
        let outcome = if close > levels.level(FibRatio::R236) {
            SignalOutcome::sell(true)
        } else if close < levels.level(FibRatio::R786) {
            SignalOutcome::buy()
        } else {
            SignalOutcome::hold()
        };

        FibonacciOutcome {
            outcome,
            positions: levels.classify(close),
        }
    }
}
