use crate::evaluation::AccuracyReport;
use serde::Serialize;
use shared::models::{FibRatio, Indicator, LevelPosition, Signal};
use std::collections::BTreeMap;

/// Everything one analyzer concluded for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorVerdict {
    pub signal: Signal,
    pub overbought: bool,
    pub target_price: f64,
    pub days_to_target: Option<i64>,
    pub accuracy: AccuracyReport,
}

/// Latest indicator values the verdicts were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IndicatorSnapshot {
    pub ema_short: Option<f64>,
    pub ema_long: Option<f64>,
    pub rsi: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub bars_analyzed: usize,
    pub last_close: f64,
    pub snapshot: IndicatorSnapshot,
    pub verdicts: BTreeMap<Indicator, IndicatorVerdict>,
    pub fibonacci_levels: BTreeMap<FibRatio, f64>,
    pub fibonacci_positions: BTreeMap<FibRatio, LevelPosition>,
}

impl AnalysisResult {
    pub fn verdict(&self, indicator: Indicator) -> Option<&IndicatorVerdict> {
        self.verdicts.get(&indicator)
    }

    pub fn signal(&self, indicator: Indicator) -> Option<Signal> {
        self.verdict(indicator).map(|v| v.signal)
    }

    pub fn has_buy(&self) -> bool {
        self.verdicts.values().any(|v| v.signal == Signal::Buy)
    }

    /// Smallest defined days-to-target across all analyzers.
    pub fn min_days_to_target(&self) -> Option<i64> {
        self.verdicts.values().filter_map(|v| v.days_to_target).min()
    }
}
