//! CSV candle loading.
//!
//! Columns are located by header name (`timestamp`/`time`/`date`/`datetime`,
//! `open`, `high`, `low`, `close`, optional `volume`), falling back to the
//! `timestamp,open,high,low,close,volume` order.

use crate::domain::market::{Candle, HistoryRange, PriceSeries};
use crate::domain::ports::MarketDataSource;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Parses unix seconds, unix milliseconds, RFC 3339, `YYYY-MM-DD HH:MM:SS`
/// or a bare `YYYY-MM-DD` into unix seconds.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        // 13+ digits are milliseconds
        return Some(if n.abs() >= 1_000_000_000_000 { n / 1000 } else { n });
    }
    if let Ok(f) = s.parse::<f64>() {
        if !f.is_finite() {
            return None;
        }
        let secs = if f.abs() >= 1e12 { f / 1000.0 } else { f };
        return Some(secs as i64);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

fn column(headers: &[String], names: &[&str], default: usize) -> usize {
    headers
        .iter()
        .position(|h| names.contains(&h.as_str()))
        .unwrap_or(default)
}

pub fn parse_candles<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let ts_col = column(&headers, &["timestamp", "time", "date", "datetime"], 0);
    let open_col = column(&headers, &["open"], 1);
    let high_col = column(&headers, &["high"], 2);
    let low_col = column(&headers, &["low"], 3);
    let close_col = column(&headers, &["close"], 4);
    let volume_col = headers.iter().position(|h| h == "volume");

    let mut candles = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Malformed CSV record {}", line + 1))?;
        let field = |col: usize, name: &str| -> Result<f64> {
            record
                .get(col)
                .ok_or_else(|| anyhow!("Record {} has no {} column", line + 1, name))?
                .parse::<f64>()
                .with_context(|| format!("Invalid {} in record {}", name, line + 1))
        };

        let raw_ts = record.get(ts_col).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts)
            .ok_or_else(|| anyhow!("Invalid timestamp {:?} in record {}", raw_ts, line + 1))?;
        let volume = match volume_col {
            Some(col) => field(col, "volume")?,
            None => 0.0,
        };

        candles.push(Candle::new(
            timestamp,
            field(open_col, "open")?,
            field(high_col, "high")?,
            field(low_col, "low")?,
            field(close_col, "close")?,
            volume,
        ));
    }

    Ok(PriceSeries::new(candles)?)
}

pub fn load_candles_from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let series = parse_candles(file).with_context(|| format!("Failed to load {:?}", path))?;
    info!("Loaded {} bars from {:?}", series.len(), path);
    Ok(series)
}

/// Serves a fixed CSV file regardless of symbol, range or interval.
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl MarketDataSource for CsvPriceSource {
    async fn fetch_candles(
        &self,
        _symbol: &str,
        _range: HistoryRange,
        _interval: &str,
    ) -> Result<PriceSeries> {
        load_candles_from_csv(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1700000000"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("1700000000000"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("1700000000.0"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("1700000000000.0"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("1700000000500.5"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("2023-11-14T22:13:20Z"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("2023-11-14 22:13:20"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_with_headers_in_any_order() {
        let data = "Close,Open,High,Low,Volume,Date\n\
                    10.5,10.0,11.0,9.5,1000,2024-01-02\n\
                    11.0,10.5,11.2,10.1,1200,2024-01-03\n";
        let series = parse_candles(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        let first = series.candles()[0];
        assert_eq!(first.open, 10.0);
        assert_eq!(first.close, 10.5);
        assert_eq!(first.volume, 1000.0);
    }

    #[test]
    fn test_volume_is_optional() {
        let data = "timestamp,open,high,low,close\n1,1,1,1,1\n2,2,2,2,2\n";
        let series = parse_candles(data.as_bytes()).unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0]);
        assert_eq!(series.candles()[1].volume, 0.0);
    }

    #[test]
    fn test_rejects_bad_rows() {
        let bad_price = "timestamp,open,high,low,close\n1,1,1,1,abc\n";
        assert!(parse_candles(bad_price.as_bytes()).is_err());

        let out_of_order = "timestamp,open,high,low,close\n2,1,1,1,1\n1,1,1,1,1\n";
        assert!(parse_candles(out_of_order.as_bytes()).is_err());
    }

    #[test]
    fn test_source_ignores_symbol_and_range() {
        let path = std::env::temp_dir().join(format!("trendscope-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, "timestamp,open,high,low,close\n1,1,1,1,1\n2,2,2,2,3\n").unwrap();
        let source = CsvPriceSource::new(&path);

        let series =
            tokio_test::block_on(source.fetch_candles("ANY", HistoryRange::OneDay, "1m")).unwrap();
        assert_eq!(series.closes(), vec![1.0, 3.0]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = CsvPriceSource::new("/nonexistent/trendscope.csv");
        let result =
            tokio_test::block_on(source.fetch_candles("ANY", HistoryRange::FiveDays, "5m"));
        assert!(result.is_err());
    }

    #[test]
    fn test_header_only_is_empty() {
        let series = parse_candles("timestamp,open,high,low,close\n".as_bytes()).unwrap();
        assert!(series.is_empty());
    }
}
