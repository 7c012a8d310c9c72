//! Yahoo Finance chart API client.
//!
//! Uses the public `v8/finance/chart` endpoint. Bars with any missing OHLC
//! value are dropped, and a repeated timestamp (the still-forming bar is
//! sometimes echoed twice) keeps the later entry.

use crate::domain::market::{Candle, HistoryRange, PriceSeries};
use crate::domain::ports::MarketDataSource;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

/// Converts a chart API response body into a price series.
pub fn parse_chart(body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).context("Failed to parse chart response")?;

    if let Some(err) = envelope.chart.error {
        bail!("Chart API error {}: {}", err.code, err.description);
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::default());
    };
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut candles: Vec<Candle> = Vec::with_capacity(result.timestamp.len());
    for (i, &timestamp) in result.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            continue;
        };
        let candle = Candle::new(
            timestamp,
            open,
            high,
            low,
            close,
            value_at(&quote.volume, i).unwrap_or(0.0),
        );

        match candles.last().map(|c| c.timestamp) {
            Some(previous) if previous == timestamp => {
                if let Some(last) = candles.last_mut() {
                    *last = candle;
                }
            }
            Some(previous) if previous > timestamp => continue,
            _ => candles.push(candle),
        }
    }

    Ok(PriceSeries::new(candles)?)
}

fn encode_symbol(symbol: &str) -> String {
    symbol
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' | b'=' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("trendscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, encode_symbol(symbol))
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: &str,
    ) -> Result<PriceSeries> {
        let url = self.chart_url(symbol);
        debug!("GET {} range={} interval={}", url, range, interval);

        let body = self
            .client
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", interval)])
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Chart request for {} was rejected", symbol))?
            .text()
            .await
            .context("Failed to read chart response body")?;

        parse_chart(&body)
    }
}
