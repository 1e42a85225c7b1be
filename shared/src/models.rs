use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    fn prices(&self) -> [(&'static str, f64); 4] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Price series for '{0}' is empty")]
    Empty(String),

    #[error("Bar {index} is not strictly after the previous bar ({previous} >= {current})")]
    NonMonotonicTimestamp {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("Bar {index} has an invalid {field} price: {value}")]
    InvalidPrice {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// An ordered, validated run of bars for one symbol.
///
/// Construction is the only place the ordering and positivity contract is
/// checked; everything downstream assumes it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(SeriesError::Empty(symbol));
        }

        for (index, bar) in bars.iter().enumerate() {
            for (field, value) in bar.prices() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(SeriesError::InvalidPrice { index, field, value });
                }
            }
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(SeriesError::NonMonotonicTimestamp {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last_close(&self) -> f64 {
        // Non-empty by construction.
        self.bars[self.bars.len() - 1].close
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent `n` bars (all of them when `n` exceeds the length).
    pub fn tail(&self, n: usize) -> PriceSeries {
        let n = n.clamp(1, self.bars.len());
        PriceSeries {
            symbol: self.symbol.clone(),
            bars: self.bars[self.bars.len() - n..].to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Buy, Signal::Sell, Signal::Hold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an analyzer slot in a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    Ema,
    Rsi,
    Bollinger,
    Fibonacci,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Ema,
        Indicator::Rsi,
        Indicator::Bollinger,
        Indicator::Fibonacci,
    ];
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indicator::Ema => "EMA",
            Indicator::Rsi => "RSI",
            Indicator::Bollinger => "Bollinger",
            Indicator::Fibonacci => "Fibonacci",
        };
        f.write_str(name)
    }
}

/// Standard retracement ratios, ordered by ascending ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FibRatio {
    #[serde(rename = "0.236")]
    R236,
    #[serde(rename = "0.382")]
    R382,
    #[serde(rename = "0.500")]
    R500,
    #[serde(rename = "0.618")]
    R618,
    #[serde(rename = "0.786")]
    R786,
}

impl FibRatio {
    pub const ALL: [FibRatio; 5] = [
        FibRatio::R236,
        FibRatio::R382,
        FibRatio::R500,
        FibRatio::R618,
        FibRatio::R786,
    ];

    pub fn value(&self) -> f64 {
        match self {
            FibRatio::R236 => 0.236,
            FibRatio::R382 => 0.382,
            FibRatio::R500 => 0.500,
            FibRatio::R618 => 0.618,
            FibRatio::R786 => 0.786,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FibRatio::R236 => "0.236",
            FibRatio::R382 => "0.382",
            FibRatio::R500 => "0.500",
            FibRatio::R618 => "0.618",
            FibRatio::R786 => "0.786",
        }
    }
}

impl fmt::Display for FibRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a price sits relative to a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelPosition {
    Above,
    Below,
    At,
}

impl LevelPosition {
    pub fn classify(price: f64, level: f64) -> Self {
        if price > level {
            LevelPosition::Above
        } else if price < level {
            LevelPosition::Below
        } else {
            LevelPosition::At
        }
    }
}
