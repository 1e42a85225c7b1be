// Engine main entry point
use anyhow::Context;
use clap::Parser;
use engine::config::AnalysisSettings;
use engine::data::CsvHistoryProvider;
use engine::services::AnalysisService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Rank tickers by indicator signals over daily CSV history")]
struct Cli {
    /// Directory holding one `<TICKER>.csv` file per ticker
    data_dir: PathBuf,

    /// Tickers to analyze
    #[arg(required = true)]
    tickers: Vec<String>,

    /// JSON settings file; defaults are used when absent
    #[arg(long, value_name = "FILE", env = "ENGINE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tickers: Vec<String> = cli.tickers.iter().map(|t| t.to_uppercase()).collect();

    let settings = match &cli.config {
        Some(path) => AnalysisSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => AnalysisSettings::default(),
    };
    info!(
        data_dir = %cli.data_dir.display(),
        tickers = tickers.len(),
        ?settings,
        "Starting analysis"
    );

    let provider = Arc::new(CsvHistoryProvider::new(&cli.data_dir));
    let top_n = settings.top_picks;
    let service = Arc::new(AnalysisService::new(settings, provider)?);

    let report = AnalysisService::analyze_batch_concurrently(service, tickers).await;
    for failure in &report.failures {
        warn!(symbol = %failure.ticker, error = %failure.error, "Skipped ticker");
    }

    let picks = report.top_picks(top_n);
    for pick in &picks {
        info!(
            symbol = %pick.ticker,
            last_close = pick.last_close,
            days_to_target = ?pick.min_days_to_target(),
            "Top pick"
        );
    }
    println!("{}", serde_json::to_string_pretty(&picks)?);

    Ok(())
}
