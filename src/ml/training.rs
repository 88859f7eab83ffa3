//! Per-horizon training loop.

use chrono::Utc;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;
use uuid::Uuid;

use crate::domain::HORIZONS;
use crate::error::{ForecastError, Result};
use crate::ml::metrics::EvalMetrics;
use crate::ml::model::{Ensemble, HorizonModel, ModelMetadata};
use crate::pipeline::dataset::TrainingFrame;
use crate::pipeline::features::FEATURE_NAMES;

/// Random forest parameters shared by all six horizon models.
///
/// Conservative defaults: 50 trees, depth capped at 10, fixed seed so a
/// retrain on the same data reproduces the same ensemble.
#[derive(Debug, Clone)]
pub struct TrainParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: Some(10),
            min_samples_split: 5,
            seed: 42,
        }
    }
}

impl TrainParams {
    fn regressor_parameters(&self) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters {
            max_depth: self.max_depth,
            min_samples_leaf: 2,
            min_samples_split: self.min_samples_split,
            n_trees: self.n_trees,
            m: None, // sqrt(n_features)
            keep_samples: false,
            seed: self.seed,
        }
    }
}

/// Held-out evaluation for one horizon, reported but never acted upon
/// automatically.
#[derive(Debug, Clone, Copy)]
pub struct HorizonReport {
    pub horizon: u8,
    pub metrics: EvalMetrics,
}

fn dense_matrix(x: &[Vec<f64>]) -> DenseMatrix<f64> {
    let n_samples = x.len();
    let n_features = x.first().map_or(0, Vec::len);
    let mut flat = Vec::with_capacity(n_samples * n_features);
    for row in x {
        flat.extend_from_slice(row);
    }
    DenseMatrix::new(n_samples, n_features, flat, false)
}

/// Fit one regressor per horizon, in horizon order 1..6.
///
/// Every horizon is trained against the same feature matrix and its own
/// target column; no model consumes another's predictions. Each fitted model
/// is evaluated on the held-out block and appended to the ensemble in
/// horizon order — the same order the store later persists and reloads.
pub fn train_ensemble(
    train: &TrainingFrame,
    test: &TrainingFrame,
    params: &TrainParams,
) -> Result<(Ensemble, Vec<HorizonReport>)> {
    if train.is_empty() || test.is_empty() {
        return Err(ForecastError::InsufficientHistory {
            needed: 2,
            got: train.len().min(test.len()),
        });
    }

    let x_train = dense_matrix(&train.x);
    let x_test = dense_matrix(&test.x);

    let mut models = Vec::with_capacity(HORIZONS);
    let mut reports = Vec::with_capacity(HORIZONS);

    for horizon in 1..=HORIZONS {
        let y_train = train.target_column(horizon);
        let regressor =
            RandomForestRegressor::fit(&x_train, &y_train, params.regressor_parameters())
                .map_err(|e| {
                    ForecastError::Regressor(format!("fit failed for horizon t+{horizon}: {e:?}"))
                })?;

        let predictions = regressor.predict(&x_test).map_err(|e| {
            ForecastError::Regressor(format!("evaluation failed for horizon t+{horizon}: {e:?}"))
        })?;
        let metrics = EvalMetrics::compute(&predictions, &test.target_column(horizon))?;
        info!(
            horizon = horizon,
            mae = metrics.mae,
            rmse = metrics.rmse,
            "trained horizon model"
        );

        let metadata = ModelMetadata {
            model_id: format!("horizon_rf_{}", Uuid::new_v4()),
            horizon: horizon as u8,
            trained_at: Utc::now(),
            training_samples: train.len(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            metrics,
        };
        models.push(HorizonModel::new(regressor, metadata));
        reports.push(HorizonReport {
            horizon: horizon as u8,
            metrics,
        });
    }

    Ok((Ensemble::new(models)?, reports))
}
