use super::SignalOutcome;
use shared::models::Signal;

/// Short/long EMA crossover.
pub struct EmaCrossAnalyzer {
    extension_threshold: f64,
}

impl EmaCrossAnalyzer {
    pub fn new(extension_threshold: f64) -> Self {
        Self { extension_threshold }
    }

    pub fn analyze(&self, short_ema: Option<f64>, long_ema: Option<f64>) -> SignalOutcome {
        let (Some(short), Some(long)) = (short_ema, long_ema) else {
            return SignalOutcome::hold();
        };

        if short > long {
            // Extended when the short average runs too far above the long one.
            let overbought = (short - long) / long > self.extension_threshold;
            SignalOutcome { signal: Signal::Buy, overbought }
        } else if short < long {
            SignalOutcome::sell(false)
        } else {
            SignalOutcome::hold()
        }
    }
}

impl Default for EmaCrossAnalyzer {
    fn default() -> Self {
        Self::new(0.05)
    }
}
