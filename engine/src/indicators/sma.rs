// Simple Moving Average (SMA) and trailing-window statistics
use super::{closes, IndicatorCalculator, IndicatorSeries};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

fn check_window(indicator: &str, values: &[f64], window: usize) -> Result<(), EngineError> {
    if window == 0 {
        return Err(EngineError::InvalidParameter(format!(
            "{} window must be greater than 0",
            indicator
        )));
    }
    if values.len() < window {
        return Err(EngineError::insufficient(indicator, window, values.len()));
    }
    Ok(())
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Mean over each trailing window of length `window`; the first `window - 1`
/// positions are undefined.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, EngineError> {
    check_window("SMA", values, window)?;

    let mut results = vec![None; window - 1];
    results.extend(values.windows(window).map(|w| Some(mean(w))));
    Ok(results)
}

/// Sample standard deviation (divides by `window - 1`) over each trailing
/// window, aligned the same way as [`rolling_mean`].
pub fn rolling_std(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if window < 2 {
        return Err(EngineError::InvalidParameter(
            "Sample standard deviation needs a window of at least 2".to_string(),
        ));
    }
    check_window("rolling std", values, window)?;

    let mut results = vec![None; window - 1];
    results.extend(values.windows(window).map(|w| {
        let m = mean(w);
        let sum_sq: f64 = w.iter().map(|v| (v - m) * (v - m)).sum();
        Some((sum_sq / (window - 1) as f64).sqrt())
    }));
    Ok(results)
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PriceBar]) -> Result<IndicatorSeries, EngineError> {
        rolling_mean(&closes(data), self.period).map(IndicatorSeries::new)
    }
}
