//! Offline (re)training of the trend model artifact from a CSV of candles.
//!
//! The analysis CLI only trains when no artifact exists. This tool is the
//! explicit way to replace a stale one:
//! ```sh
//! cargo run --bin train_model -- --csv data/msft_5m.csv --model-dir models --force
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use trendscope::application::indicators::{IndicatorFrame, IndicatorWindows};
use trendscope::application::ml::{MIN_TRAINING_ROWS, build_training_set};
use trendscope::config::validate_windows;
use trendscope::domain::ml::{FEATURE_NAMES, ModelArtifact, TrainingSet};
use trendscope::domain::ports::ModelStore;
use trendscope::infrastructure::FileModelStore;
use trendscope::infrastructure::market_data::load_candles_from_csv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to candle CSV (timestamp,open,high,low,close[,volume])
    #[arg(long)]
    csv: PathBuf,

    /// Directory the artifact is written to
    #[arg(long, default_value = "models")]
    model_dir: PathBuf,

    #[arg(long, default_value_t = 20)]
    sma_window: usize,

    #[arg(long, default_value_t = 14)]
    rsi_window: usize,

    /// Overwrite an existing artifact
    #[arg(long)]
    force: bool,
}

fn print_training_summary(set: &TrainingSet, artifact: &ModelArtifact) -> Result<()> {
    let ups = set.labels.iter().filter(|&&l| l == 1).count();
    let mut correct = 0;
    for (row, &label) in set.features.iter().zip(&set.labels) {
        let predicted = u8::from(artifact.predict_proba(row)? > 0.5);
        if predicted == label {
            correct += 1;
        }
    }

    println!("\n══════════════════════════════════════════════════════");
    println!("  TRAINING SUMMARY");
    println!("══════════════════════════════════════════════════════");
    println!("  Rows:              {}", set.len());
    println!(
        "  Next bar up:       {} ({:.1}%)",
        ups,
        ups as f64 / set.len() as f64 * 100.0
    );
    println!(
        "  In-sample accuracy: {:.1}%",
        correct as f64 / set.len() as f64 * 100.0
    );
    println!("\n  Coefficients (standardised features):");
    for (name, coef) in FEATURE_NAMES.iter().zip(&artifact.classifier.coefficients) {
        println!("    {:<10} {:+.4}", name, coef);
    }
    println!("    {:<10} {:+.4}", "intercept", artifact.classifier.intercept);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    validate_windows(args.sma_window, args.rsi_window)?;

    let store = FileModelStore::new(&args.model_dir);
    if store.exists() && !args.force {
        bail!(
            "An artifact already exists in {:?}; pass --force to replace it",
            store.dir()
        );
    }

    let series = load_candles_from_csv(&args.csv)?;
    let frame = IndicatorFrame::compute(
        &series,
        IndicatorWindows {
            sma: args.sma_window,
            rsi: args.rsi_window,
        },
    );
    let set = build_training_set(&frame);
    if set.len() < MIN_TRAINING_ROWS {
        bail!(
            "Only {} usable rows from {} bars; at least {} are needed",
            set.len(),
            series.len(),
            MIN_TRAINING_ROWS
        );
    }

    let artifact = store
        .train_and_save(&set)
        .context("Failed to train and persist model artifact")?;
    print_training_summary(&set, &artifact)?;
    println!("\n  Model saved to {:?}", store.dir());
    Ok(())
}
