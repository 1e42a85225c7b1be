use super::SignalOutcome;

pub struct RsiAnalyzer {
    oversold: f64,
    overbought: f64,
}

impl RsiAnalyzer {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self { oversold, overbought }
    }

    pub fn analyze(&self, rsi: Option<f64>) -> SignalOutcome {
        match rsi {
            Some(value) if value < self.oversold => SignalOutcome::buy(),
            Some(value) if value > self.overbought => SignalOutcome::sell(true),
            _ => SignalOutcome::hold(),
        }
    }
}

impl Default for RsiAnalyzer {
    fn default() -> Self {
        Self::new(30.0, 70.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Signal;

    #[test]
    fn test_rsi_thresholds() {
        let analyzer = RsiAnalyzer::default();
        assert_eq!(analyzer.analyze(Some(25.0)).signal, Signal::Buy);
        assert_eq!(analyzer.analyze(Some(100.0)), SignalOutcome::sell(true));
        assert_eq!(analyzer.analyze(Some(50.0)), SignalOutcome::hold());
    }

    #[test]
    fn test_rsi_boundaries_hold() {
        let analyzer = RsiAnalyzer::default();
        assert_eq!(analyzer.analyze(Some(30.0)), SignalOutcome::hold());
        assert_eq!(analyzer.analyze(Some(70.0)), SignalOutcome::hold());
    }

    #[test]
    fn test_undefined_rsi_holds() {
        assert_eq!(RsiAnalyzer::default().analyze(None), SignalOutcome::hold());
    }
}
