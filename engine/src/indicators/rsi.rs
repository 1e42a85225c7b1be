// Relative Strength Index (RSI) indicator implementation
use super::{closes, IndicatorCalculator, IndicatorSeries};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        // RS is infinite when there were only gains; a window with no movement at all has no RSI.
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI from simple rolling means of gains and losses over `period` deltas.
/// The first defined value sits at index `period`.
pub fn rsi(values: &[f64], period: usize) -> Result<IndicatorSeries, EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter("RSI period must be greater than 0".to_string()));
    }
    if values.len() <= period {
        return Err(EngineError::insufficient("RSI", period + 1, values.len()));
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = values
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let mut results = vec![None; period];
    for end in period..=gains.len() {
        let avg_gain = gains[end - period..end].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[end - period..end].iter().sum::<f64>() / period as f64;
        results.push(rsi_from_averages(avg_gain, avg_loss));
    }
    Ok(IndicatorSeries::new(results))
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PriceBar]) -> Result<IndicatorSeries, EngineError> {
        rsi(&closes(data), self.period)
    }
}
