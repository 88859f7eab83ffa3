use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HORIZONS;

/// Ordered point predictions, position `i` holding the estimate for `t+(i+1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub generated_at: DateTime<Utc>,
    pub predictions: Vec<f64>,
}

impl ForecastResult {
    pub fn new(predictions: Vec<f64>) -> Self {
        debug_assert_eq!(predictions.len(), HORIZONS);
        Self {
            generated_at: Utc::now(),
            predictions,
        }
    }

    /// Labels aligned with `predictions`: `["t+1", .., "t+6"]`.
    pub fn horizon_labels() -> Vec<String> {
        (1..=HORIZONS).map(|i| format!("t+{i}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_all_horizons_in_order() {
        let labels = ForecastResult::horizon_labels();
        assert_eq!(labels.len(), HORIZONS);
        assert_eq!(labels[0], "t+1");
        assert_eq!(labels[5], "t+6");
    }
}
