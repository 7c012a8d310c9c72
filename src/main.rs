//! Trendscope - technical-indicator trend analysis for a single ticker.
//!
//! # Usage
//! ```sh
//! cargo run -- --symbol MSFT
//! cargo run -- --symbol AAPL --mode intraday --sma-window 30
//! cargo run -- --symbol TEST --csv data/test.csv --json
//! ```
//!
//! # Environment Variables
//! - `ANALYSIS_MODE` - `short-term` (default) or `intraday`
//! - `SMA_WINDOW` / `RSI_WINDOW` - indicator windows (default 20 / 14)
//! - `MODEL_DIR` - where the trained model artifact lives (default `models`)
//! - `DATA_INTERVAL` - candle interval requested from Yahoo (default `5m`)

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use trendscope::application::analysis_service::TrendAnalysisService;
use trendscope::application::explainer::explain;
use trendscope::application::market_data::load_price_history;
use trendscope::config::AppConfig;
use trendscope::domain::market::AnalysisMode;
use trendscope::domain::ports::MarketDataSource;
use trendscope::infrastructure::{CsvPriceSource, FileModelStore, YahooFinanceClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticker symbol (e.g. AAPL, MSFT, RELIANCE.NS)
    #[arg(long, default_value = "MSFT")]
    symbol: String,

    /// Read candles from a CSV file instead of Yahoo Finance
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Analysis mode: short-term or intraday
    #[arg(long)]
    mode: Option<AnalysisMode>,

    /// Moving-average window (10-50)
    #[arg(long)]
    sma_window: Option<usize>,

    /// RSI window (7-30)
    #[arg(long)]
    rsi_window: Option<usize>,

    /// Directory holding the trained model artifact
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Print the full report (including indicator series) as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for the report
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(mode) = args.mode {
        config.analysis.mode = mode;
    }
    if let Some(window) = args.sma_window {
        config.analysis.sma_window = window;
    }
    if let Some(window) = args.rsi_window {
        config.analysis.rsi_window = window;
    }
    if let Some(dir) = args.model_dir {
        config.data.model_dir = dir;
    }
    config.validate()?;

    info!(
        "Trendscope {}: symbol={}, mode={}, windows={:?}",
        env!("CARGO_PKG_VERSION"),
        args.symbol,
        config.analysis.mode,
        config.analysis.windows()
    );

    let source: Box<dyn MarketDataSource> = match &args.csv {
        Some(path) => Box::new(CsvPriceSource::new(path)),
        None => Box::new(YahooFinanceClient::new(config.data.yahoo_base_url.clone())?),
    };

    let history = load_price_history(
        source.as_ref(),
        &args.symbol,
        config.analysis.mode,
        &config.data.interval,
    )
    .await?;
    if history.series.is_empty() {
        bail!("No data found for symbol {}", args.symbol);
    }

    let store = Arc::new(FileModelStore::new(&config.data.model_dir));
    let service = TrendAnalysisService::new(store, config.analysis.windows());
    let report = service.analyze(&args.symbol, &history.series)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if config.analysis.mode == AnalysisMode::Intraday && history.used_fallback_range {
        println!(
            "Intraday data may be unavailable outside market hours. Showing recent data instead.\n"
        );
    }

    println!("Model Prediction");
    println!("  Trend:      {}", report.signal.trend);
    println!("  Confidence: {:.2}", report.signal.confidence);
    println!("  Source:     {}", report.signal.source);
    println!("  Horizon:    next {} candle", config.data.interval);
    if config.analysis.mode == AnalysisMode::Intraday {
        println!("  Note: intraday mode uses limited history; predictions may be less stable.");
    }

    println!("\nExplanation\n{}", explain(&report));
    Ok(())
}
