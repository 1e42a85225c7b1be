// Analysis settings, loaded from a JSON file or defaulted
use crate::error::EngineError;
use crate::evaluation::AccuracyMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub ema_short_span: usize,
    pub ema_long_span: usize,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
    pub rsi_window: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Relative gap between the EMAs above which a Buy counts as extended.
    pub ema_extension: f64,
    pub velocity_lookback: usize,
    pub target_uplift: f64,
    pub target_drawdown: f64,
    /// Bars requested from the history provider (about one trading year).
    pub lookback_bars: usize,
    pub top_picks: usize,
    pub accuracy_mode: AccuracyMode,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            ema_short_span: 6,
            ema_long_span: 26,
            bollinger_window: 20,
            bollinger_k: 2.0,
            rsi_window: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            ema_extension: 0.05,
            velocity_lookback: 30,
            target_uplift: 0.05,
            target_drawdown: 0.05,
            lookback_bars: 252,
            top_picks: 2,
            accuracy_mode: AccuracyMode::FixedEmaSignal,
        }
    }
}

impl AnalysisSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let settings: AnalysisSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded analysis settings file");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let windows = [
            ("ema_short_span", self.ema_short_span),
            ("ema_long_span", self.ema_long_span),
            ("rsi_window", self.rsi_window),
            ("velocity_lookback", self.velocity_lookback),
            ("lookback_bars", self.lookback_bars),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(EngineError::ConfigError(format!("{} must be greater than 0", name)));
            }
        }
        if self.bollinger_window < 2 {
            return Err(EngineError::ConfigError("bollinger_window must be at least 2".to_string()));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(EngineError::ConfigError(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        let ratios = [
            ("bollinger_k", self.bollinger_k),
            ("ema_extension", self.ema_extension),
            ("target_uplift", self.target_uplift),
            ("target_drawdown", self.target_drawdown),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::ConfigError(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Fewest bars for which every indicator is defined at the last position.
    pub fn min_bars(&self) -> usize {
        self.bollinger_window.max(self.rsi_window + 1)
    }
}
