//! Aligned feature/target matrices and the temporal train/test split.

use chrono::{DateTime, Utc};

use crate::domain::HORIZONS;
use crate::error::{ForecastError, Result};
use crate::pipeline::targets::{TrainingRow, MIN_RAW_ROWS};

/// Row-aligned training data: `x[i]` is the feature vector for
/// `timestamps[i]` in canonical column order, `y[i][h]` the target for
/// horizon `h + 1`.
#[derive(Debug, Clone)]
pub struct TrainingFrame {
    pub timestamps: Vec<DateTime<Utc>>,
    pub x: Vec<Vec<f64>>,
    pub y: Vec<[f64; HORIZONS]>,
}

impl TrainingFrame {
    /// Build the aligned matrices. An empty row set is a hard error: the
    /// trainer must never be handed a zero-row frame to silently accept.
    pub fn from_rows(rows: &[TrainingRow]) -> Result<Self> {
        if rows.is_empty() {
            return Err(ForecastError::InsufficientHistory {
                needed: MIN_RAW_ROWS,
                got: 0,
            });
        }

        let mut timestamps = Vec::with_capacity(rows.len());
        let mut x = Vec::with_capacity(rows.len());
        let mut y = Vec::with_capacity(rows.len());
        for row in rows {
            if !row.features.is_finite() {
                return Err(ForecastError::FeatureValidation(format!(
                    "non-finite feature at {}",
                    row.timestamp
                )));
            }
            timestamps.push(row.timestamp);
            x.push(row.features.to_vector());
            y.push(row.targets);
        }

        Ok(Self { timestamps, x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Target column for one horizon (1-based).
    pub fn target_column(&self, horizon: usize) -> Vec<f64> {
        debug_assert!((1..=HORIZONS).contains(&horizon));
        self.y.iter().map(|row| row[horizon - 1]).collect()
    }

    /// Split into earliest contiguous training block and latest contiguous
    /// test block. Never shuffled: a shuffled split would leak future values
    /// into training, which invalidates any time-series evaluation.
    pub fn temporal_split(&self, train_ratio: f64) -> Result<(TrainingFrame, TrainingFrame)> {
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(ForecastError::FeatureValidation(format!(
                "train ratio must be strictly between 0 and 1, got {train_ratio}"
            )));
        }

        let split_idx = (self.len() as f64 * train_ratio).floor() as usize;
        if split_idx == 0 || split_idx == self.len() {
            return Err(ForecastError::InsufficientHistory {
                needed: MIN_RAW_ROWS + 1,
                got: self.len(),
            });
        }

        let train = TrainingFrame {
            timestamps: self.timestamps[..split_idx].to_vec(),
            x: self.x[..split_idx].to_vec(),
            y: self.y[..split_idx].to_vec(),
        };
        let test = TrainingFrame {
            timestamps: self.timestamps[split_idx..].to_vec(),
            x: self.x[split_idx..].to_vec(),
            y: self.y[split_idx..].to_vec(),
        };

        Ok((train, test))
    }
}
