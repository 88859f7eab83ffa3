//! Evaluation metrics for trained horizon models.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Held-out evaluation results for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Square Error
    pub rmse: f64,
    /// R-squared
    pub r2: f64,
}

impl EvalMetrics {
    pub fn compute(predictions: &[f64], targets: &[f64]) -> Result<Self> {
        if predictions.len() != targets.len() {
            return Err(ForecastError::Regressor(format!(
                "prediction and target count mismatch: {} vs {}",
                predictions.len(),
                targets.len()
            )));
        }
        if predictions.is_empty() {
            return Err(ForecastError::Regressor(
                "no predictions to evaluate".to_string(),
            ));
        }

        let n = predictions.len() as f64;

        let mae: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / n;

        let mse: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / n;
        let rmse = mse.sqrt();

        let mean_target: f64 = targets.iter().sum::<f64>() / n;
        let ss_tot: f64 = targets.iter().map(|t| (t - mean_target).powi(2)).sum();
        let ss_res: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (t - p).powi(2))
            .sum();
        let r2 = if ss_tot.abs() < 1e-10 {
            0.0
        } else {
            1.0 - (ss_res / ss_tot)
        };

        Ok(Self { mae, rmse, r2 })
    }
}
