use crate::application::indicators::IndicatorFrame;
use crate::domain::ml::{FeatureRow, TrainingSet};

/// Fractional close-to-close change into `index`. Undefined at the first bar
/// and after a zero close.
fn close_return(closes: &[f64], index: usize) -> Option<f64> {
    let previous = *closes.get(index.checked_sub(1)?)?;
    if previous == 0.0 {
        return None;
    }
    Some((closes[index] - previous) / previous)
}

fn next_bar_label(closes: &[f64], index: usize) -> Option<u8> {
    let next = *closes.get(index + 1)?;
    Some(u8::from(next > closes[index]))
}

fn features_at(frame: &IndicatorFrame, closes: &[f64], index: usize) -> Option<FeatureRow> {
    let ret = close_return(closes, index)?;
    let sma = frame.sma[index]?;
    let rsi = frame.rsi[index]?;
    Some(FeatureRow::new(ret, closes[index] - sma, rsi))
}

/// Derives aligned features and next-bar labels from an indicator frame.
///
/// Rows missing any feature or the label are dropped; nothing is imputed and
/// timestamp order is preserved. The final bar has no label, so its features
/// are only reported through `TrainingSet::latest`.
pub fn build_training_set(frame: &IndicatorFrame) -> TrainingSet {
    let closes = frame.closes();
    let mut set = TrainingSet::default();

    for index in 0..frame.len() {
        let Some(row) = features_at(frame, &closes, index) else {
            continue;
        };
        set.latest = Some(row);

        if let Some(label) = next_bar_label(&closes, index) {
            set.timestamps.push(frame.candles[index].timestamp);
            set.features.push(row);
            set.labels.push(label);
        }
    }

    set
}
