use crate::domain::errors::ModelError;
use serde::{Deserialize, Serialize};

/// Per-column standardisation: `(x - mean) / scale`.
///
/// Columns whose spread is indistinguishable from zero get a scale of 1,
/// so a constant feature maps to 0 instead of NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let first = rows.first().ok_or(ModelError::EmptyTrainingSet)?;
        let width = first.len();
        for row in rows {
            if row.len() != width {
                return Err(ModelError::DimensionMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
        }

        let n = rows.len() as f64;
        let mut means = Vec::with_capacity(width);
        let mut scales = Vec::with_capacity(width);
        for col in 0..width {
            let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
            let variance = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            means.push(mean);
            scales.push(if is_negligible(std, mean) { 1.0 } else { std });
        }

        Ok(Self { means, scales })
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.width() {
            return Err(ModelError::DimensionMismatch {
                expected: self.width(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}

fn is_negligible(std: f64, mean: f64) -> bool {
    std <= 10.0 * f64::EPSILON * mean.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardises_columns() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        assert_eq!(scaler.means, vec![2.0, 10.0]);
        assert_eq!(scaler.scales[0], 1.0);
        let scaled = scaler.transform(&rows).unwrap();
        assert_eq!(scaled[0], vec![-1.0, 0.0]);
        assert_eq!(scaled[1], vec![1.0, 0.0]);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let rows = vec![vec![100.0], vec![100.0], vec![100.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        assert_eq!(scaler.scales, vec![1.0]);
        assert_eq!(scaler.transform_row(&[100.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_rejects_empty_and_ragged_input() {
        assert_eq!(
            StandardScaler::fit(&[]).unwrap_err(),
            ModelError::EmptyTrainingSet
        );
        let ragged = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(StandardScaler::fit(&ragged).is_err());
    }

    #[test]
    fn test_transform_checks_width() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(
            scaler.transform_row(&[1.0]).unwrap_err(),
            ModelError::DimensionMismatch {
                expected: 3,
                got: 1
            }
        );
    }
}
