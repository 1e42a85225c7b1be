// Per-indicator decision logic over the latest indicator values
pub mod bands;
pub mod ema;
pub mod fibonacci;
pub mod rsi;

pub use bands::BandAnalyzer;
pub use ema::EmaCrossAnalyzer;
pub use fibonacci::{FibonacciAnalyzer, FibonacciOutcome};
pub use rsi::RsiAnalyzer;

use serde::Serialize;
use shared::models::Signal;

/// A directional verdict plus whether the move looks stretched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalOutcome {
    pub signal: Signal,
    pub overbought: bool,
}

impl SignalOutcome {
    pub fn hold() -> Self {
        Self { signal: Signal::Hold, overbought: false }
    }

    pub fn buy() -> Self {
        Self { signal: Signal::Buy, overbought: false }
    }

    pub fn sell(overbought: bool) -> Self {
        Self { signal: Signal::Sell, overbought }
    }
}
