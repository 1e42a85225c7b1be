// Target price and time-to-target from recent price velocity
use serde::Serialize;
use shared::models::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub target_price: f64,
    /// Absent when the recent average change is zero or negative.
    pub days_to_target: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ProjectionEstimator {
    lookback: usize,
    buy_uplift: f64,
    sell_drawdown: f64,
}

impl ProjectionEstimator {
    pub fn new(lookback: usize, buy_uplift: f64, sell_drawdown: f64) -> Self {
        Self { lookback, buy_uplift, sell_drawdown }
    }

    /// Mean fractional change between consecutive closes over the most recent
    /// `lookback` closes (or all of them when fewer exist).
    pub fn average_change(&self, closes: &[f64]) -> Option<f64> {
        let start = closes.len().saturating_sub(self.lookback);
        let recent = &closes[start..];
        if recent.len() < 2 {
            return None;
        }
        let changes: Vec<f64> = recent.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
        Some(changes.iter().sum::<f64>() / changes.len() as f64)
    }

    /// Hold always targets the current price; retracement levels are keyed by
    /// ratio, never by signal.
    pub fn target_price(&self, signal: Signal, current: f64) -> f64 {
        match signal {
            Signal::Buy => current * (1.0 + self.buy_uplift),
            Signal::Sell => current * (1.0 - self.sell_drawdown),
            Signal::Hold => current,
        }
    }

    pub fn days_to_target(target: f64, current: f64, average_change: Option<f64>) -> Option<i64> {
        match average_change {
            Some(change) if change > 0.0 => {
                let days = ((target - current) / (change * current)).floor();
                // Tiny positive velocities can push the count past what i64 holds.
                (days.is_finite() && days.abs() < i64::MAX as f64).then_some(days as i64)
            }
            _ => None,
        }
    }

    pub fn estimate(&self, signal: Signal, closes: &[f64]) -> Option<Projection> {
        let current = *closes.last()?;
        let target_price = self.target_price(signal, current);
        let days_to_target =
            Self::days_to_target(target_price, current, self.average_change(closes));
        tracing::debug!(%signal, current, target_price, ?days_to_target, "Projected target");
        Some(Projection { target_price, days_to_target })
    }
}

impl Default for ProjectionEstimator {
    fn default() -> Self {
        Self::new(30, 0.05, 0.05)
    }
}
