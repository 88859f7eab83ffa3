//! Trained horizon models and the ordered ensemble.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::domain::HORIZONS;
use crate::error::{ForecastError, Result};
use crate::ml::metrics::EvalMetrics;
use crate::pipeline::features::{FeatureSet, FEATURE_NAMES};

/// Metadata persisted alongside each regressor.
///
/// The `horizon` tag is the load-time defence against artifact reordering:
/// key enumeration order alone is never trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    /// Horizon this model was trained for, 1-based (t+1 .. t+6).
    pub horizon: u8,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
    pub feature_names: Vec<String>,
    pub metrics: EvalMetrics,
}

/// One trained regressor bound to exactly one forecast horizon.
#[derive(Debug, Serialize, Deserialize)]
pub struct HorizonModel {
    pub metadata: ModelMetadata,
    regressor: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl HorizonModel {
    pub(crate) fn new(
        regressor: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
        metadata: ModelMetadata,
    ) -> Self {
        Self {
            metadata,
            regressor,
        }
    }

    pub fn horizon(&self) -> u8 {
        self.metadata.horizon
    }

    /// Predict the production value `horizon` hours ahead of the feature
    /// row's timestamp. Pure and deterministic for a fixed model and input.
    pub fn predict(&self, features: &FeatureSet) -> Result<f64> {
        if !features.is_finite() {
            return Err(ForecastError::FeatureValidation(format!(
                "non-finite feature handed to horizon t+{} model",
                self.metadata.horizon
            )));
        }

        let x = DenseMatrix::new(1, FEATURE_NAMES.len(), features.to_vector(), false);
        let predictions = self
            .regressor
            .predict(&x)
            .map_err(|e| ForecastError::Regressor(format!("prediction failed: {e:?}")))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Regressor("regressor returned no prediction".to_string()))
    }
}

/// Exactly one model per horizon, position `i` holding the model for
/// `t+(i+1)`. The ordering correspondence is identical at training,
/// persistence, and load time; a reordering bug would silently mislabel
/// predictions, so construction validates both the count and every tag.
#[derive(Debug)]
pub struct Ensemble {
    pub(crate) models: Vec<HorizonModel>,
}

impl Ensemble {
    pub fn new(models: Vec<HorizonModel>) -> Result<Self> {
        if models.len() != HORIZONS {
            return Err(ForecastError::EnsembleSizeMismatch {
                expected: HORIZONS,
                got: models.len(),
            });
        }
        for (idx, model) in models.iter().enumerate() {
            let expected = (idx + 1) as u8;
            if model.horizon() != expected {
                return Err(ForecastError::OrderingViolation {
                    expected,
                    found: model.horizon(),
                });
            }
        }
        Ok(Self { models })
    }

    pub fn models(&self) -> &[HorizonModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
