// Exponential Moving Average (EMA) indicator implementation
use super::{closes, IndicatorCalculator, IndicatorSeries};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct Ema {
    name: String,
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            name: format!("EMA({})", span),
            span,
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

/// Recursive exponential smoothing with `alpha = 2 / (span + 1)`, seeded by
/// the first value. Defined at every position.
pub fn ema(values: &[f64], span: usize) -> Result<IndicatorSeries, EngineError> {
    if span == 0 {
        return Err(EngineError::InvalidParameter("EMA span must be greater than 0".to_string()));
    }
    let Some((&first, rest)) = values.split_first() else {
        return Err(EngineError::insufficient("EMA", 1, 0));
    };

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous = first;
    results.push(Some(previous));

    for &value in rest {
        previous = alpha * value + (1.0 - alpha) * previous;
        results.push(Some(previous));
    }
    Ok(IndicatorSeries::new(results))
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "span": self.span })
    }

    fn calculate(&self, data: &[PriceBar]) -> Result<IndicatorSeries, EngineError> {
        ema(&closes(data), self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn create_bar(day: i64, close: f64) -> PriceBar {
        PriceBar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day),
            open: close, high: close, low: close, close,
        }
    }

    #[test]
    fn test_ema_calculation() {
        let bars: Vec<PriceBar> = [10.0, 11.0, 12.0, 13.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| create_bar(i as i64, c))
            .collect();
        let results = Ema::new(3).calculate(&bars).unwrap();
        // alpha = 0.5, seeded with 10.0
        // 11 -> 10.5, 12 -> 11.25, 13 -> 12.125
        assert_eq!(results.values(), &[Some(10.0), Some(10.5), Some(11.25), Some(12.125)]);
    }

    #[test]
    fn test_ema_span_one_is_identity() {
        let values = [3.5, 7.25, 1.0, 42.0, 0.5];
        let results = ema(&values, 1).unwrap();
        let expected: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        assert_eq!(results.values(), expected.as_slice());
    }

    #[test]
    fn test_ema_single_value() {
        assert_eq!(ema(&[5.0], 26).unwrap().last(), Some(5.0));
    }

    #[test]
    fn test_ema_empty_is_insufficient() {
        assert!(matches!(
            ema(&[], 6),
            Err(EngineError::InsufficientData { required: 1, available: 0, .. })
        ));
    }

    #[test]
    fn test_ema_zero_span_rejected() {
        assert!(matches!(ema(&[1.0], 0), Err(EngineError::InvalidParameter(_))));
    }

    #[test]
    fn test_ema_parameters() {
        let ema = Ema::new(6);
        assert_eq!(ema.name(), "EMA(6)");
        assert_eq!(ema.parameters(), serde_json::json!({ "span": 6 }));
    }
}
