//! Per-horizon model ensemble: training, evaluation, inference.
//!
//! One regressor is fitted independently for each forecast horizon. All six
//! see the same input features, so an error at one horizon cannot propagate
//! into another's prediction.

pub mod metrics;
pub mod model;
pub mod training;

pub use metrics::EvalMetrics;
pub use model::{Ensemble, HorizonModel, ModelMetadata};
pub use training::{train_ensemble, HorizonReport, TrainParams};
