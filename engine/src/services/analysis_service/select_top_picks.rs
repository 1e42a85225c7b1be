// Cross-ticker ranking of analysis results
use crate::models::AnalysisResult;

/// Tickers with at least one Buy, ranked by their soonest defined
/// days-to-target. Tickers with no estimate at all are left out; ties keep
/// input order.
pub fn select_top_picks(results: &[AnalysisResult], n: usize) -> Vec<&AnalysisResult> {
    let mut ranked: Vec<(i64, &AnalysisResult)> = results
        .iter()
        .filter(|r| r.has_buy())
        .filter_map(|r| r.min_days_to_target().map(|days| (days, r)))
        .collect();
    // sort_by_key is stable
    ranked.sort_by_key(|(days, _)| *days);

    tracing::debug!(candidates = ranked.len(), requested = n, "Ranked buy candidates");
    ranked.into_iter().take(n).map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::AccuracyReport;
    use crate::models::{IndicatorSnapshot, IndicatorVerdict};
    use shared::models::{Indicator, Signal};
    use std::collections::BTreeMap;

    fn result(ticker: &str, slots: &[(Signal, Option<i64>)]) -> AnalysisResult {
        let verdicts = Indicator::ALL
            .iter()
            .zip(slots)
            .map(|(&indicator, &(signal, days))| {
                (
                    indicator,
                    IndicatorVerdict {
                        signal,
                        overbought: false,
                        target_price: 100.0,
                        days_to_target: days,
                        accuracy: AccuracyReport::default(),
                    },
                )
            })
            .collect();
        AnalysisResult {
            ticker: ticker.to_string(),
            bars_analyzed: 40,
            last_close: 100.0,
            snapshot: IndicatorSnapshot::default(),
            verdicts,
            fibonacci_levels: BTreeMap::new(),
            fibonacci_positions: BTreeMap::new(),
        }
    }

    fn tickers(picks: &[&AnalysisResult]) -> Vec<String> {
        picks.iter().map(|r| r.ticker.clone()).collect()
    }

    #[test]
    fn test_only_buy_with_estimate_is_picked() {
        let results = vec![
            result("A", &[(Signal::Hold, None), (Signal::Hold, None)]),
            result("B", &[(Signal::Buy, Some(5)), (Signal::Hold, None)]),
            result("C", &[(Signal::Sell, None), (Signal::Hold, None)]),
        ];
        assert_eq!(tickers(&select_top_picks(&results, 2)), vec!["B"]);
    }

    #[test]
    fn test_ranks_by_soonest_estimate_across_analyzers() {
        let results = vec![
            result("A", &[(Signal::Buy, Some(9)), (Signal::Hold, Some(4))]),
            result("B", &[(Signal::Buy, Some(2)), (Signal::Hold, Some(8))]),
            result("C", &[(Signal::Buy, Some(6))]),
        ];
        assert_eq!(tickers(&select_top_picks(&results, 2)), vec!["B", "A"]);
        assert_eq!(tickers(&select_top_picks(&results, 10)), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_buy_without_any_estimate_is_excluded() {
        let results = vec![
            result("A", &[(Signal::Buy, None), (Signal::Hold, None)]),
            result("B", &[(Signal::Buy, Some(0))]),
        ];
        // Zero is a real estimate, not a missing one.
        assert_eq!(tickers(&select_top_picks(&results, 2)), vec!["B"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let results = vec![
            result("X", &[(Signal::Buy, Some(3))]),
            result("Y", &[(Signal::Buy, Some(1))]),
            result("Z", &[(Signal::Buy, Some(3))]),
            result("W", &[(Signal::Buy, Some(3))]),
        ];
        assert_eq!(tickers(&select_top_picks(&results, 3)), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_zero_picks_requested() {
        let results = vec![result("A", &[(Signal::Buy, Some(1))])];
        assert!(select_top_picks(&results, 0).is_empty());
    }
}
