//! Error types for the forecasting core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur in the forecasting pipeline.
///
/// All variants are recoverable at the serving boundary; the API layer maps
/// them to non-2xx responses instead of crashing the process. Training-time
/// failures halt the training run with a diagnostic.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Raw data source could not be read or parsed.
    #[error("data source unreadable: {0}")]
    DataLoad(String),

    /// Fewer valid rows than required to form any feature+target pair.
    #[error("insufficient history: need at least {needed} rows, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// A NaN or otherwise absent feature value reached training or inference.
    #[error("feature validation failed: {0}")]
    FeatureValidation(String),

    /// The ensemble does not contain exactly one model per horizon.
    #[error("ensemble size mismatch: expected {expected} models, got {got}")]
    EnsembleSizeMismatch { expected: usize, got: usize },

    /// An expected model artifact is missing or unreadable.
    #[error("model artifact not found: {path}")]
    ModelArtifactNotFound { path: PathBuf },

    /// A model artifact exists but could not be decoded.
    #[error("model artifact corrupt: {path}: {reason}")]
    ModelArtifactCorrupt { path: PathBuf, reason: String },

    /// A stored artifact's horizon tag disagrees with its position.
    #[error("ordering violation: expected horizon t+{expected}, artifact is tagged t+{found}")]
    OrderingViolation { expected: u8, found: u8 },

    /// The underlying regressor failed to fit or predict.
    #[error("regressor error: {0}")]
    Regressor(String),

    /// Failure writing artifacts to the model store.
    #[error("model store io error at {path}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
