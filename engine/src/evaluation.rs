// Hit-rate of a fixed signal replayed over bar-to-bar moves.
//
// This is not a strategy backtest: the same verdict is scored against every
// consecutive pair of closes.
use serde::{Deserialize, Serialize};
use shared::models::Signal;

/// Which signal gets replayed into each indicator's accuracy slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyMode {
    /// Every slot replays the EMA crossover signal.
    #[default]
    FixedEmaSignal,
    /// Each slot replays its own analyzer's signal.
    OwnSignal,
}

/// Percent correct per signal class; 0 for a class that never occurred.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AccuracyReport {
    pub buy: f64,
    pub sell: f64,
    pub hold: f64,
}

impl AccuracyReport {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Buy => self.buy,
            Signal::Sell => self.sell,
            Signal::Hold => self.hold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassTally {
    pub correct: usize,
    pub total: usize,
}

impl ClassTally {
    fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccuracyTally {
    buy: ClassTally,
    sell: ClassTally,
    hold: ClassTally,
}

impl AccuracyTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_mut(&mut self, signal: Signal) -> &mut ClassTally {
        match signal {
            Signal::Buy => &mut self.buy,
            Signal::Sell => &mut self.sell,
            Signal::Hold => &mut self.hold,
        }
    }

    pub fn class(&self, signal: Signal) -> ClassTally {
        match signal {
            Signal::Buy => self.buy,
            Signal::Sell => self.sell,
            Signal::Hold => self.hold,
        }
    }

    /// Scores one move: Buy needs a rise, Sell a fall, Hold always counts.
    pub fn record(&mut self, signal: Signal, current_close: f64, next_close: f64) {
        let correct = match signal {
            Signal::Buy => next_close > current_close,
            Signal::Sell => next_close < current_close,
            Signal::Hold => true,
        };
        let class = self.class_mut(signal);
        class.total += 1;
        if correct {
            class.correct += 1;
        }
    }

    pub fn merge(&mut self, other: &AccuracyTally) {
        for signal in Signal::ALL {
            let theirs = other.class(signal);
            let ours = self.class_mut(signal);
            ours.correct += theirs.correct;
            ours.total += theirs.total;
        }
    }

    pub fn report(&self) -> AccuracyReport {
        AccuracyReport {
            buy: self.buy.percent(),
            sell: self.sell.percent(),
            hold: self.hold.percent(),
        }
    }
}

pub fn tally_fixed_signal(closes: &[f64], signal: Signal) -> AccuracyTally {
    let mut tally = AccuracyTally::new();
    for pair in closes.windows(2) {
        tally.record(signal, pair[0], pair[1]);
    }
    tally
}

pub fn replay_fixed_signal(closes: &[f64], signal: Signal) -> AccuracyReport {
    tally_fixed_signal(closes, signal).report()
}
