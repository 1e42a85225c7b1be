// Bollinger-style bands: rolling mean +/- k sample standard deviations
use super::sma::{rolling_mean, rolling_std};
use super::{closes, IndicatorSeries};
use crate::error::EngineError;
use serde::Serialize;
use serde_json::Value;
use shared::models::PriceBar;

pub struct BollingerBands {
    name: String,
    window: usize,
    multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSeries {
    pub middle: IndicatorSeries,
    pub std_dev: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BollingerBands {
    pub fn new(window: usize, multiplier: f64) -> Self {
        Self {
            name: format!("BB({}, {})", window, multiplier),
            window,
            multiplier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window, "multiplier": self.multiplier })
    }

    pub fn calculate(&self, data: &[PriceBar]) -> Result<BandSeries, EngineError> {
        self.calculate_values(&closes(data))
    }

    pub fn calculate_values(&self, values: &[f64]) -> Result<BandSeries, EngineError> {
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "Band multiplier must be a non-negative number, got {}",
                self.multiplier
            )));
        }
        if self.window > 0 && values.len() < self.window {
            return Err(EngineError::insufficient(&self.name, self.window, values.len()));
        }
        let middle = rolling_mean(values, self.window)?;
        let std_dev = rolling_std(values, self.window)?;

        let k = self.multiplier;
        let (upper, lower): (Vec<_>, Vec<_>) = middle
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => (Some(m + k * s), Some(m - k * s)),
                _ => (None, None),
            })
            .unzip();

        Ok(BandSeries {
            middle: middle.into(),
            std_dev: std_dev.into(),
            upper: upper.into(),
            lower: lower.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_width_is_twice_k_std() {
        let values: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        for window in [2, 5, 20] {
            let bands = BollingerBands::new(window, 2.0).calculate_values(&values).unwrap();
            for i in (window - 1)..values.len() {
                let width = bands.upper.get(i).unwrap() - bands.lower.get(i).unwrap();
                let expected = 2.0 * 2.0 * bands.std_dev.get(i).unwrap();
                assert!((width - expected).abs() < 1e-9, "window {} index {}", window, i);
            }
        }
    }

    #[test]
    fn test_bands_undefined_during_warm_up() {
        let values: Vec<f64> = (1..=25).map(f64::from).collect();
        let bands = BollingerBands::new(20, 2.0).calculate_values(&values).unwrap();
        assert_eq!(bands.upper.first_defined(), Some(19));
        assert_eq!(bands.lower.first_defined(), Some(19));
        assert_eq!(bands.upper.len(), 25);
    }

    #[test]
    fn test_flat_series_collapses_bands() {
        let bands = BollingerBands::new(20, 2.0).calculate_values(&[100.0; 40]).unwrap();
        assert_eq!(bands.upper.last(), Some(100.0));
        assert_eq!(bands.lower.last(), Some(100.0));
        assert_eq!(bands.std_dev.last(), Some(0.0));
    }

    #[test]
    fn test_bands_insufficient_data() {
        let err = BollingerBands::new(20, 2.0).calculate_values(&[1.0; 10]).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient data for BB(20, 2): need 20 bars, have 10");
        assert!(matches!(
            err,
            EngineError::InsufficientData { required: 20, available: 10, .. }
        ));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let result = BollingerBands::new(3, -1.0).calculate_values(&[1.0; 10]);
        assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
    }
}
