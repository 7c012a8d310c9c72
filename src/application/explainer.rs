use crate::application::analysis_service::AnalysisReport;
use crate::domain::market::SignalSource;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub fn rsi_condition(rsi: f64) -> &'static str {
    if rsi > RSI_OVERBOUGHT {
        "overbought"
    } else if rsi < RSI_OVERSOLD {
        "oversold"
    } else {
        "neutral"
    }
}

/// Plain-language summary of a report.
pub fn explain(report: &AnalysisReport) -> String {
    let signal = &report.signal;
    let latest = &report.latest;
    let above = latest.close - latest.sma > 0.0;

    let mut lines = vec![
        format!(
            "The model predicts a {} trend for {} with a confidence of {:.2}.",
            signal.trend, report.symbol, signal.confidence
        ),
        "Key Reasons:".to_string(),
        format!(
            "- RSI is {:.2}, which indicates {} conditions.",
            latest.rsi,
            rsi_condition(latest.rsi)
        ),
        format!(
            "- The price is {} the {}-period moving average, suggesting {} momentum.",
            if above { "above" } else { "below" },
            report.windows.sma,
            if above { "bullish" } else { "bearish" }
        ),
    ];

    if signal.source == SignalSource::RuleBased {
        lines.push(String::new());
        lines.push(
            "Not enough data for the learned model; this trend is rule-based \
             (price versus moving average)."
                .to_string(),
        );
    }

    lines.push(String::new());
    lines.push(
        "This analysis is for educational purposes only and not financial advice.".to_string(),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::indicators::{IndicatorFrame, IndicatorRow, IndicatorWindows};
    use crate::domain::market::{Trend, TrendSignal};

    fn report(close: f64, sma: f64, rsi: f64, source: SignalSource) -> AnalysisReport {
        let windows = IndicatorWindows { sma: 20, rsi: 14 };
        AnalysisReport {
            symbol: "MSFT".to_string(),
            signal: TrendSignal {
                trend: Trend::Up,
                confidence: 0.6789,
                source,
            },
            windows,
            latest: IndicatorRow {
                timestamp: 0,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
                sma,
                rsi,
            },
            frame: IndicatorFrame {
                windows,
                candles: Vec::new(),
                sma: Vec::new(),
                rsi: Vec::new(),
            },
        }
    }

    #[test]
    fn test_rsi_condition_thresholds() {
        assert_eq!(rsi_condition(70.5), "overbought");
        assert_eq!(rsi_condition(70.0), "neutral");
        assert_eq!(rsi_condition(29.9), "oversold");
        assert_eq!(rsi_condition(50.0), "neutral");
    }

    #[test]
    fn test_bullish_explanation() {
        let text = explain(&report(105.0, 100.0, 75.0, SignalSource::Model));
        assert!(text.starts_with("The model predicts a UP trend for MSFT with a confidence of 0.68."));
        assert!(text.contains("RSI is 75.00, which indicates overbought conditions."));
        assert!(text.contains("above the 20-period moving average, suggesting bullish momentum"));
        assert!(!text.contains("rule-based"));
        assert!(text.ends_with("not financial advice."));
    }

    #[test]
    fn test_bearish_rule_based_explanation() {
        let text = explain(&report(95.0, 100.0, 20.0, SignalSource::RuleBased));
        assert!(text.contains("oversold"));
        assert!(text.contains("below the 20-period moving average, suggesting bearish momentum"));
        assert!(text.contains("rule-based"));
    }
}
