//! Forecast engine: one feature vector in, six ordered predictions out.

use crate::domain::{ForecastResult, HORIZONS};
use crate::error::{ForecastError, Result};
use crate::ml::model::Ensemble;
use crate::pipeline::features::FeatureSet;

/// Produce the full six-hour forecast from one feature vector.
///
/// Every horizon model is applied to the SAME input vector — horizon 3 never
/// sees horizon 1's or 2's output. Position `i` of the result is the
/// prediction of `ensemble.models()[i]`, i.e. horizon `t+(i+1)`.
pub fn predict_all(features: &FeatureSet, ensemble: &Ensemble) -> Result<ForecastResult> {
    if !features.is_finite() {
        return Err(ForecastError::FeatureValidation(
            "input feature vector contains non-finite fields".to_string(),
        ));
    }
    if ensemble.len() != HORIZONS {
        return Err(ForecastError::EnsembleSizeMismatch {
            expected: HORIZONS,
            got: ensemble.len(),
        });
    }

    let mut predictions = Vec::with_capacity(HORIZONS);
    for model in ensemble.models() {
        predictions.push(model.predict(features)?);
    }
    Ok(ForecastResult::new(predictions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::Ensemble;
    use crate::ml::training::{train_ensemble, TrainParams};
    use crate::pipeline::dataset::TrainingFrame;
    use crate::pipeline::features::FeatureSet;
    use crate::pipeline::targets::TrainingRow;
    use chrono::{TimeZone, Utc};

    fn rows(n: usize) -> Vec<TrainingRow> {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let v = 20.0 + (i as f64 * 0.5).cos() * 5.0;
                let mut targets = [0.0; HORIZONS];
                for (k, t) in targets.iter_mut().enumerate() {
                    *t = v + k as f64 * 0.4;
                }
                TrainingRow {
                    timestamp: start + chrono::Duration::hours(i as i64),
                    features: FeatureSet {
                        hour_of_day: (i % 24) as u32,
                        day_of_week: ((i / 24) % 7) as u32,
                        month: 3,
                        lag_1: v - 0.4,
                        lag_2: v - 0.8,
                        rolling_mean_3: v - 0.4,
                    },
                    targets,
                }
            })
            .collect()
    }

    fn trained_ensemble() -> Ensemble {
        let frame = TrainingFrame::from_rows(&rows(36)).unwrap();
        let (train, test) = frame.temporal_split(0.8).unwrap();
        train_ensemble(&train, &test, &TrainParams::default()).unwrap().0
    }

    #[test]
    fn predicts_one_value_per_horizon() {
        let ensemble = trained_ensemble();
        let features = rows(36)[18].features;

        let result = predict_all(&features, &ensemble).unwrap();
        assert_eq!(result.predictions.len(), HORIZONS);
        assert!(result.predictions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn same_input_gives_same_forecast() {
        let ensemble = trained_ensemble();
        let features = rows(36)[18].features;

        let first = predict_all(&features, &ensemble).unwrap();
        let second = predict_all(&features, &ensemble).unwrap();
        assert_eq!(first.predictions, second.predictions);
    }

    #[test]
    fn positions_match_individual_horizon_models() {
        let ensemble = trained_ensemble();
        let features = rows(36)[5].features;

        let result = predict_all(&features, &ensemble).unwrap();
        for (idx, model) in ensemble.models().iter().enumerate() {
            assert_eq!(result.predictions[idx], model.predict(&features).unwrap());
        }
    }

    #[test]
    fn nan_features_are_rejected() {
        let ensemble = trained_ensemble();
        let mut features = rows(36)[18].features;
        features.rolling_mean_3 = f64::NAN;

        let err = predict_all(&features, &ensemble).unwrap_err();
        assert!(matches!(err, ForecastError::FeatureValidation(_)));
    }

    #[test]
    fn undersized_ensemble_is_rejected() {
        let mut models = trained_ensemble().models;
        models.truncate(4);
        let ensemble = Ensemble { models };
        let features = rows(36)[18].features;

        let err = predict_all(&features, &ensemble).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::EnsembleSizeMismatch {
                expected: HORIZONS,
                got: 4
            }
        ));
    }
}
