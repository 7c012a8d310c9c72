//! Binary logistic regression for next-bar direction.
//!
//! Fitted with full-batch gradient descent on the mean log-loss plus an L2
//! penalty on the coefficients (the intercept is not penalised). Starting
//! weights are zero, so fitting the same data twice yields identical models.

use crate::domain::errors::ModelError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegressionParameters {
    pub learning_rate: f64,
    pub max_iter: usize,
    pub tolerance: f64,
    /// Inverse regularisation strength; smaller values shrink harder.
    pub c: f64,
}

impl Default for LogisticRegressionParameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter: 2_000,
            tolerance: 1e-9,
            c: 1.0,
        }
    }
}

impl LogisticRegressionParameters {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[u8],
        params: LogisticRegressionParameters,
    ) -> Result<Self, ModelError> {
        if rows.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: rows.len(),
                labels: labels.len(),
            });
        }
        let width = rows.first().ok_or(ModelError::EmptyTrainingSet)?.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(ModelError::DimensionMismatch {
                expected: width,
                got: bad.len(),
            });
        }

        let n = rows.len();
        let n_f = n as f64;
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let x = Array2::from_shape_vec((n, width), flat).map_err(|_| {
            ModelError::DimensionMismatch {
                expected: n * width,
                got: rows.iter().map(Vec::len).sum(),
            }
        })?;
        let y: Array1<f64> = labels.iter().map(|&l| f64::from(l)).collect();

        let penalty = 1.0 / (params.c * n_f);
        let learning_rate = params.learning_rate.min(max_stable_step(rows, penalty));
        let mut weights = Array1::<f64>::zeros(width);
        let mut bias = 0.0;
        let mut last_cost = f64::INFINITY;

        for iter in 0..params.max_iter {
            let probs = (x.dot(&weights) + bias).mapv(sigmoid);
            let errors = &probs - &y;

            let cost = log_loss(&y, &probs) + 0.5 * penalty * weights.dot(&weights);
            if (last_cost - cost).abs() < params.tolerance {
                debug!("Logistic regression converged at iteration {}", iter);
                break;
            }
            last_cost = cost;

            let grad_w = x.t().dot(&errors) / n_f + &weights * penalty;
            let grad_b = errors.sum() / n_f;

            weights.scaled_add(-learning_rate, &grad_w);
            bias -= learning_rate * grad_b;
        }

        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NonFiniteModel);
        }
        Ok(Self {
            coefficients: weights.to_vec(),
            intercept: bias,
        })
    }

    /// Probability of class 1 for one already-scaled row.
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: row.len(),
            });
        }
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

/// Largest step that keeps gradient descent contracting.
///
/// The mean log-loss Hessian is bounded by `0.25 * max ||[x, 1]||^2`, and the
/// L2 term adds `penalty`. Steps at or below `1 / L` never overshoot.
fn max_stable_step(rows: &[Vec<f64>], penalty: f64) -> f64 {
    let max_norm_sq = rows
        .iter()
        .map(|r| r.iter().map(|x| x * x).sum::<f64>())
        .fold(0.0, f64::max);
    1.0 / (0.25 * (max_norm_sq + 1.0) + penalty)
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn log_loss(y: &Array1<f64>, probs: &Array1<f64>) -> f64 {
    let eps = 1e-15;
    -y.iter()
        .zip(probs.iter())
        .map(|(&t, &p)| {
            let p = p.clamp(eps, 1.0 - eps);
            t * p.ln() + (1.0 - t) * (1.0 - p).ln()
        })
        .sum::<f64>()
        / y.len() as f64
}
