use shared::models::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient data for {indicator}: need {required} bars, have {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("Invalid indicator parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid price series: {source}")]
    InvalidSeries {
        #[from]
        source: SeriesError,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data error: {0}")]
    MarketDataError(String),

    #[error("Analysis task error: {0}")]
    TaskError(String),
}

impl EngineError {
    pub(crate) fn insufficient(indicator: &str, required: usize, available: usize) -> Self {
        EngineError::InsufficientData {
            indicator: indicator.to_string(),
            required,
            available,
        }
    }
}
