use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much history to request from a market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRange {
    OneDay,
    FiveDays,
}

impl HistoryRange {
    /// Provider range token, e.g. `5d`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneDay => "1d",
            HistoryRange::FiveDays => "5d",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis horizon selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Five days of intraday bars. Gives the classifier the most rows.
    #[default]
    ShortTerm,
    /// Today's bars only, widened to five days when the session is empty.
    Intraday,
}

impl AnalysisMode {
    pub fn history_range(&self) -> HistoryRange {
        match self {
            AnalysisMode::ShortTerm => HistoryRange::FiveDays,
            AnalysisMode::Intraday => HistoryRange::OneDay,
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "short-term" | "shortterm" => Ok(AnalysisMode::ShortTerm),
            "intraday" => Ok(AnalysisMode::Intraday),
            _ => bail!(
                "Invalid ANALYSIS_MODE: {}. Must be 'short-term' or 'intraday'",
                s
            ),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::ShortTerm => write!(f, "short-term"),
            AnalysisMode::Intraday => write!(f, "intraday"),
        }
    }
}
