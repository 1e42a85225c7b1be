use super::PriceHistoryProvider;
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::{PriceBar, PriceSeries};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

// Date and number handling for exported daily-bar files
pub mod bar_format {
    use crate::error::EngineError;
    use chrono::{DateTime, NaiveDate, Utc};

    pub fn parse_price(s: &str) -> Result<f64, EngineError> {
        s.trim()
            .parse::<f64>()
            .map_err(|e| {
                EngineError::CsvDataFormatError(format!("Failed to parse price '{}': {}", s, e))
            })
    }

    /// Accepts `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DD HH:MM:SS+HH:MM`.
    /// Plain dates are midnight UTC.
    pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, EngineError> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Failed to parse date '{}'", s)))
    }

}

/// Reads `<dir>/<TICKER>.csv` files with a `Date,Open,High,Low,Close` header.
/// Column order does not matter and extra columns are ignored.
pub struct CsvHistoryProvider {
    dir: PathBuf,
}

struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, EngineError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    EngineError::CsvDataFormatError(format!(
                        "Missing '{}' column in CSV header",
                        name
                    ))
                })
        };
        Ok(Columns {
            date: find("Date")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
        })
    }
}

impl CsvHistoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker))
    }

    pub fn load_bars_from_csv(path: &Path) -> Result<Vec<PriceBar>, EngineError> {
        let file = File::open(path)?;
        Self::read_bars(BufReader::new(file))
    }

    pub fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::locate(rdr.headers()?)?;
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;
            let field = |pos: usize, name: &str| {
                record.get(pos).filter(|v| !v.is_empty()).ok_or_else(|| {
                    EngineError::CsvDataFormatError(format!(
                        "Missing '{}' field at line {}",
                        name, line
                    ))
                })
            };
            let with_line = |name: &str, e: EngineError| {
                EngineError::CsvDataFormatError(format!(
                    "Error parsing '{}' at line {}: {}",
                    name, line, e
                ))
            };
            let price = |pos: usize, name: &str| -> Result<f64, EngineError> {
                bar_format::parse_price(field(pos, name)?).map_err(|e| with_line(name, e))
            };

            let timestamp = bar_format::parse_timestamp(field(columns.date, "Date")?)
                .map_err(|e| with_line("Date", e))?;
            let open = price(columns.open, "Open")?;
            let high = price(columns.high, "High")?;
            let low = price(columns.low, "Low")?;
            let close = price(columns.close, "Close")?;

            bars.push(PriceBar { timestamp, open, high, low, close });
        }
        Ok(bars)
    }
}

impl PriceHistoryProvider for CsvHistoryProvider {
    fn history(&self, ticker: &str, lookback: usize) -> Result<PriceSeries, EngineError> {
        let path = self.path_for(ticker);
        if !path.is_file() {
            return Err(EngineError::MarketDataError(format!(
                "Price history for '{}' not found at {}",
                ticker,
                path.display()
            )));
        }
        let bars = Self::load_bars_from_csv(&path)?;
        tracing::debug!(
            symbol = %ticker,
            path = %path.display(),
            count = bars.len(),
            "Loaded bars from CSV"
        );

        let series = PriceSeries::new(ticker, bars)?;
        Ok(series.tail(lookback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, ticker: &str, content: &str) {
        let mut file = File::create(dir.path().join(format!("{}.csv", ticker))).unwrap();
        writeln!(file, "{}", content).unwrap();
    }

    #[test]
    fn test_read_bars_valid_data() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,101.5,99.0,101.0,1000
2024-01-03,101.0,103.0,100.5,102.5,1200";
        let bars = CsvHistoryProvider::read_bars(csv_content.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 101.5);
        assert_eq!(bars[1].close, 102.5);
        assert_eq!(bars[1].timestamp, bar_format::parse_timestamp("2024-01-03").unwrap());
    }

    #[test]
    fn test_read_bars_reordered_columns() {
        let csv_content = "close,date,low,high,open\n10.5,2024-01-02,10,11,10.2";
        let bars = CsvHistoryProvider::read_bars(csv_content.as_bytes()).unwrap();
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[0].open, 10.2);
    }

    #[test]
    fn test_read_bars_missing_column() {
        let csv_content = "Date,Open,High,Low\n2024-01-02,1,2,0.5";
        let result = CsvHistoryProvider::read_bars(csv_content.as_bytes());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Missing 'Close' column"));
    }

    #[test]
    fn test_read_bars_invalid_price() {
        let csv_content = "Date,Open,High,Low,Close\n2024-01-02,abc,2,0.5,1";
        let result = CsvHistoryProvider::read_bars(csv_content.as_bytes());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Error parsing 'Open' at line 2"), "{}", err);
    }

    #[test]
    fn test_history_from_directory() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "AAA",
            "Date,Open,High,Low,Close\n2024-01-02,1,1,1,1\n2024-01-03,2,2,2,2\n2024-01-04,3,3,3,3",
        );
        let provider = CsvHistoryProvider::new(dir.path());
        let series = provider.history("AAA", 2).unwrap();
        assert_eq!(series.symbol(), "AAA");
        assert_eq!(series.closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_history_missing_ticker() {
        let dir = TempDir::new().unwrap();
        let provider = CsvHistoryProvider::new(dir.path());
        let err = provider.history("NOPE", 10).unwrap_err();
        assert!(matches!(err, EngineError::MarketDataError(ref msg) if msg.contains("not found")));
    }

    #[test]
    fn test_history_rejects_unordered_file() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BAD", "Date,Open,High,Low,Close\n2024-01-03,1,1,1,1\n2024-01-02,2,2,2,2");
        let provider = CsvHistoryProvider::new(dir.path());
        assert!(matches!(provider.history("BAD", 10), Err(EngineError::InvalidSeries { .. })));
    }
}
