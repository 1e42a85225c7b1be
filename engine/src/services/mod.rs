// Service layer sequencing indicators, analyzers, projection and evaluation per ticker.
pub mod analysis_service;

pub use analysis_service::{select_top_picks, AnalysisService, BatchReport, TickerFailure};
