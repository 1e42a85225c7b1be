// Handler running the full indicator -> signal -> projection -> accuracy pipeline for one series
use std::collections::BTreeMap;

use crate::config::AnalysisSettings;
use crate::error::EngineError;
use crate::evaluation::{replay_fixed_signal, AccuracyMode, AccuracyReport};
use crate::indicators::{bollinger::BollingerBands, ema::ema, rsi::rsi, FibonacciRetracement};
use crate::models::{AnalysisResult, IndicatorSnapshot, IndicatorVerdict};
use crate::projection::ProjectionEstimator;
use crate::signals::{
    BandAnalyzer, EmaCrossAnalyzer, FibonacciAnalyzer, RsiAnalyzer, SignalOutcome,
};
use shared::models::{Indicator, PriceSeries, Signal};

/// Windowed indicators that cannot be computed yet stay undefined; any other
/// failure is returned.
fn defined_after_warm_up<T>(result: Result<T, EngineError>) -> Result<Option<T>, EngineError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(EngineError::InsufficientData { indicator, required, available }) => {
            tracing::debug!(%indicator, required, available, "Indicator still warming up");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn handle_analyze_series(
    series: &PriceSeries,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, EngineError> {
    let closes = series.closes();
    let last_close = series.last_close();
    if series.len() < settings.min_bars() {
        tracing::warn!(
            symbol = %series.symbol(),
            bars = series.len(),
            min_bars = settings.min_bars(),
            "Short history, some indicators stay undefined"
        );
    }

    let ema_short = ema(&closes, settings.ema_short_span)?;
    let ema_long = ema(&closes, settings.ema_long_span)?;
    let bands = defined_after_warm_up(
        BollingerBands::new(settings.bollinger_window, settings.bollinger_k)
            .calculate_values(&closes),
    )?;
    let rsi_series = defined_after_warm_up(rsi(&closes, settings.rsi_window))?;
    let fib_levels = FibonacciRetracement::calculate_values(&closes)?;

    let snapshot = IndicatorSnapshot {
        ema_short: ema_short.last(),
        ema_long: ema_long.last(),
        rsi: rsi_series.as_ref().and_then(|series| series.last()),
        upper_band: bands.as_ref().and_then(|b| b.upper.last()),
        lower_band: bands.as_ref().and_then(|b| b.lower.last()),
    };
    tracing::debug!(symbol = %series.symbol(), ?snapshot, "Latest indicator values");

    let fib = FibonacciAnalyzer.analyze(last_close, &fib_levels);
    let outcomes: [(Indicator, SignalOutcome); 4] = [
        (
            Indicator::Ema,
            EmaCrossAnalyzer::new(settings.ema_extension)
                .analyze(snapshot.ema_short, snapshot.ema_long),
        ),
        (
            Indicator::Rsi,
            RsiAnalyzer::new(settings.rsi_oversold, settings.rsi_overbought).analyze(snapshot.rsi),
        ),
        (
            Indicator::Bollinger,
            BandAnalyzer.analyze(last_close, snapshot.upper_band, snapshot.lower_band),
        ),
        (Indicator::Fibonacci, fib.outcome),
    ];

    let estimator = ProjectionEstimator::new(
        settings.velocity_lookback,
        settings.target_uplift,
        settings.target_drawdown,
    );
    let ema_signal = outcomes[0].1.signal;
    let ema_accuracy = replay_fixed_signal(&closes, ema_signal);

    let mut verdicts = BTreeMap::new();
    for (indicator, outcome) in outcomes {
        let projection = estimator
            .estimate(outcome.signal, &closes)
            .ok_or_else(|| EngineError::insufficient("projection", 1, closes.len()))?;
        let accuracy: AccuracyReport = match settings.accuracy_mode {
            AccuracyMode::FixedEmaSignal => ema_accuracy,
            AccuracyMode::OwnSignal => replay_fixed_signal(&closes, outcome.signal),
        };
        verdicts.insert(
            indicator,
            IndicatorVerdict {
                signal: outcome.signal,
                overbought: outcome.overbought,
                target_price: projection.target_price,
                days_to_target: projection.days_to_target,
                accuracy,
            },
        );
    }

    let signal_of =
        |indicator: Indicator| verdicts.get(&indicator).map_or(Signal::Hold, |v| v.signal);
    let (ema_sig, rsi_sig, band_sig, fib_sig) = (
        signal_of(Indicator::Ema),
        signal_of(Indicator::Rsi),
        signal_of(Indicator::Bollinger),
        signal_of(Indicator::Fibonacci),
    );
    tracing::info!(
        symbol = %series.symbol(),
        bars = series.len(),
        last_close,
        ema = %ema_sig,
        rsi = %rsi_sig,
        bollinger = %band_sig,
        fibonacci = %fib_sig,
        "Analyzed ticker"
    );

    Ok(AnalysisResult {
        ticker: series.symbol().to_string(),
        bars_analyzed: series.len(),
        last_close,
        snapshot,
        verdicts,
        fibonacci_levels: fib_levels.iter().collect(),
        fibonacci_positions: fib.positions,
    })
}
