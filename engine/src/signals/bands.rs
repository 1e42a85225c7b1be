use super::SignalOutcome;

/// Close relative to the upper and lower bands.
#[derive(Default)]
pub struct BandAnalyzer;

impl BandAnalyzer {
    pub fn analyze(&self, close: f64, upper: Option<f64>, lower: Option<f64>) -> SignalOutcome {
        let (Some(upper), Some(lower)) = (upper, lower) else {
            return SignalOutcome::hold();
        };

        if close > upper {
            SignalOutcome::sell(true)
        } else if close < lower {
            SignalOutcome::buy()
        } else {
            SignalOutcome::hold()
        }
    }
}
