//! Configuration module for Trendscope.
//!
//! Settings are read from environment variables (an optional `.env` file is
//! loaded by the binary first) and grouped by concern: analysis parameters
//! and market-data/storage locations.

mod analysis_config;
mod data_config;

pub use analysis_config::{
    AnalysisEnvConfig, RSI_WINDOW_RANGE, SMA_WINDOW_RANGE, validate_windows,
};
pub use data_config::DataEnvConfig;

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub analysis: AnalysisEnvConfig,
    pub data: DataEnvConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Checks the settings that have bounds. Call after applying overrides.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            analysis: AnalysisEnvConfig::from_lookup(lookup)
                .context("Failed to load analysis config")?,
            data: DataEnvConfig::from_lookup(lookup),
        })
    }
}
