//! Market-data and model storage configuration parsing.

use crate::infrastructure::market_data::yahoo::DEFAULT_BASE_URL;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DataEnvConfig {
    /// Candle interval requested from the provider, e.g. `5m`.
    pub interval: String,
    pub yahoo_base_url: String,
    /// Directory holding the persisted model artifact.
    pub model_dir: PathBuf,
}

impl Default for DataEnvConfig {
    fn default() -> Self {
        Self {
            interval: "5m".to_string(),
            yahoo_base_url: DEFAULT_BASE_URL.to_string(),
            model_dir: PathBuf::from("models"),
        }
    }
}

impl DataEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            interval: lookup("DATA_INTERVAL").unwrap_or(defaults.interval),
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            model_dir: lookup("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_config_defaults() {
        let config = DataEnvConfig::from_lookup(&|_: &str| None);
        assert_eq!(config.interval, "5m");
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert!(config.yahoo_base_url.starts_with("https://"));
    }

    #[test]
    fn test_data_config_overrides() {
        let config = DataEnvConfig::from_lookup(&|key: &str| match key {
            "MODEL_DIR" => Some("/var/lib/trendscope".to_string()),
            "DATA_INTERVAL" => Some("15m".to_string()),
            _ => None,
        });
        assert_eq!(config.model_dir, PathBuf::from("/var/lib/trendscope"));
        assert_eq!(config.interval, "15m");
    }
}
