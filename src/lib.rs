//! Six-hour-ahead energy production forecasting.
//!
//! The core is a feature-derivation/target-construction pipeline feeding an
//! ensemble of per-horizon regressors: one independently trained model for
//! each of the six forecast horizons (t+1 .. t+6). Trained models are
//! persisted one artifact per horizon and reloaded through a load-once cache
//! for serving.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod ml;
pub mod pipeline;
pub mod store;
pub mod telemetry;

pub use error::{ForecastError, Result};
