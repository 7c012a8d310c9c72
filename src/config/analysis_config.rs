//! Analysis configuration parsing from environment variables.
//!
//! Window bounds are the ranges offered to users. They are a
//! configuration policy only; the indicator functions accept any window.

use crate::application::indicators::IndicatorWindows;
use crate::domain::market::AnalysisMode;
use anyhow::{Context, Result, ensure};
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const SMA_WINDOW_RANGE: RangeInclusive<usize> = 10..=50;
pub const RSI_WINDOW_RANGE: RangeInclusive<usize> = 7..=30;

#[derive(Debug, Clone)]
pub struct AnalysisEnvConfig {
    pub mode: AnalysisMode,
    pub sma_window: usize,
    pub rsi_window: usize,
}

impl Default for AnalysisEnvConfig {
    fn default() -> Self {
        let windows = IndicatorWindows::default();
        Self {
            mode: AnalysisMode::ShortTerm,
            sma_window: windows.sma,
            rsi_window: windows.rsi,
        }
    }
}

impl AnalysisEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let mode = match lookup("ANALYSIS_MODE") {
            Some(raw) => AnalysisMode::from_str(&raw)?,
            None => defaults.mode,
        };
        let sma_window = parse_usize(lookup, "SMA_WINDOW", defaults.sma_window)?;
        let rsi_window = parse_usize(lookup, "RSI_WINDOW", defaults.rsi_window)?;

        // Bounds are checked by `validate` once CLI overrides are applied
        Ok(Self {
            mode,
            sma_window,
            rsi_window,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_windows(self.sma_window, self.rsi_window)
    }

    pub fn windows(&self) -> IndicatorWindows {
        IndicatorWindows {
            sma: self.sma_window,
            rsi: self.rsi_window,
        }
    }
}

pub fn validate_windows(sma_window: usize, rsi_window: usize) -> Result<()> {
    ensure!(
        SMA_WINDOW_RANGE.contains(&sma_window),
        "SMA window {} outside {}..={}",
        sma_window,
        SMA_WINDOW_RANGE.start(),
        SMA_WINDOW_RANGE.end()
    );
    ensure!(
        RSI_WINDOW_RANGE.contains(&rsi_window),
        "RSI window {} outside {}..={}",
        rsi_window,
        RSI_WINDOW_RANGE.start(),
        RSI_WINDOW_RANGE.end()
    );
    Ok(())
}

fn parse_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> Result<usize> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<usize>()
        .context(format!("Failed to parse {}", key))
}
