// engine/src/services/analysis_service/mod.rs
// AnalysisService and the batch entry points; per-ticker work lives in analyze_series.
use crate::config::AnalysisSettings;
use crate::data::PriceHistoryProvider;
use crate::error::EngineError;
use crate::models::AnalysisResult;
use serde::Serialize;
use shared::models::PriceSeries;
use std::sync::Arc;

pub mod analyze_series;
pub mod select_top_picks;

pub use select_top_picks::select_top_picks;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerFailure {
    pub ticker: String,
    pub error: String,
}

/// Per-ticker outcomes of a batch run, in input order.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<TickerFailure>,
}

impl BatchReport {
    fn push(&mut self, ticker: &str, outcome: Result<AnalysisResult, EngineError>) {
        match outcome {
            Ok(result) => self.results.push(result),
            Err(e) => {
                tracing::warn!(
                    symbol = %ticker,
                    error = %e,
                    "Ticker analysis failed, continuing batch"
                );
                self.failures.push(TickerFailure {
                    ticker: ticker.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    pub fn top_picks(&self, n: usize) -> Vec<&AnalysisResult> {
        select_top_picks(&self.results, n)
    }
}

pub struct AnalysisService {
    settings: AnalysisSettings,
    provider: Arc<dyn PriceHistoryProvider>,
}

impl AnalysisService {
    pub fn new(
        settings: AnalysisSettings,
        provider: Arc<dyn PriceHistoryProvider>,
    ) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(AnalysisService { settings, provider })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn analyze_series(&self, series: &PriceSeries) -> Result<AnalysisResult, EngineError> {
        analyze_series::handle_analyze_series(series, &self.settings)
    }

    pub fn analyze_ticker(&self, ticker: &str) -> Result<AnalysisResult, EngineError> {
        tracing::info!(
            symbol = %ticker,
            lookback = self.settings.lookback_bars,
            "Fetching price history"
        );
        let series = self.provider.history(ticker, self.settings.lookback_bars)?;
        self.analyze_series(&series)
    }

    pub fn analyze_batch(&self, tickers: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        for ticker in tickers {
            report.push(ticker, self.analyze_ticker(ticker));
        }
        report
    }

    /// Same as [`analyze_batch`](Self::analyze_batch), one blocking task per ticker.
    pub async fn analyze_batch_concurrently(
        service: Arc<AnalysisService>,
        tickers: Vec<String>,
    ) -> BatchReport {
        let handles: Vec<_> = tickers
            .iter()
            .map(|ticker| {
                let service = Arc::clone(&service);
                let ticker = ticker.clone();
                tokio::task::spawn_blocking(move || service.analyze_ticker(&ticker))
            })
            .collect();

        let mut report = BatchReport::default();
        for (ticker, handle) in tickers.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(EngineError::TaskError(format!(
                    "Analysis task for '{}' did not complete: {}",
                    ticker, join_error
                ))),
            };
            report.push(ticker, outcome);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryHistoryProvider;
    use chrono::{Duration, TimeZone, Utc};
    use shared::models::{Indicator, PriceBar, Signal};

    fn create_bars(closes: &[f64]) -> Vec<PriceBar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: base + Duration::days(i as i64),
                open: close, high: close, low: close, close,
            })
            .collect()
    }

    fn create_test_service() -> Arc<AnalysisService> {
        let mut provider = InMemoryHistoryProvider::new();
        let rising: Vec<f64> = (1..=40).map(|i| 100.0 + i as f64).collect();
        provider.add_bars("RISE", create_bars(&rising));
        provider.add_bars("FLAT", create_bars(&[100.0; 40]));
        provider.add_bars("SHORT", create_bars(&[100.0, 101.0, 102.0]));
        provider.add_bars("BAD", create_bars(&[100.0, -1.0, 102.0]));
        Arc::new(AnalysisService::new(AnalysisSettings::default(), Arc::new(provider)).unwrap())
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = AnalysisSettings { rsi_window: 0, ..AnalysisSettings::default() };
        let result = AnalysisService::new(settings, Arc::new(InMemoryHistoryProvider::new()));
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let service = create_test_service();
        let report =
            service.analyze_batch(&tickers(&["RISE", "MISSING", "SHORT", "BAD", "FLAT"]));

        // Short history still yields a result, with the windowed indicators undefined.
        let analyzed: Vec<&str> = report.results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(analyzed, vec!["RISE", "SHORT", "FLAT"]);
        assert_eq!(report.results[1].snapshot.rsi, None);
        let failed: Vec<&str> = report.failures.iter().map(|f| f.ticker.as_str()).collect();
        assert_eq!(failed, vec!["MISSING", "BAD"]);
        assert!(report.failures[0].error.contains("not found"));
        assert!(report.failures[1].error.contains("Invalid price series"));
    }

    #[test]
    fn test_batch_top_picks() {
        let service = create_test_service();
        let report = service.analyze_batch(&tickers(&["FLAT", "RISE"]));
        let picks = report.top_picks(2);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].ticker, "RISE");
    }

    #[tokio::test]
    async fn test_concurrent_batch_matches_sequential() {
        let service = create_test_service();
        let names = tickers(&["FLAT", "MISSING", "RISE"]);
        let sequential = service.analyze_batch(&names);
        let concurrent =
            AnalysisService::analyze_batch_concurrently(Arc::clone(&service), names).await;

        assert_eq!(concurrent.results, sequential.results);
        assert_eq!(concurrent.failures, sequential.failures);
        assert_eq!(concurrent.results[1].signal(Indicator::Ema), Some(Signal::Buy));
    }
}
