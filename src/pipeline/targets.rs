//! Forward-looking target construction for multi-step training.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RawObservation, HORIZONS};
use crate::pipeline::features::{FeatureRow, FeatureSet, ROLLING_WINDOW};

/// Smallest raw series that can yield one training row: enough leading
/// history for a full feature window plus all six forward targets.
pub const MIN_RAW_ROWS: usize = HORIZONS + ROLLING_WINDOW;

/// A feature row paired with the six observed values that follow it.
/// `targets[i]` is the raw production `i + 1` hours after `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub timestamp: DateTime<Utc>,
    pub features: FeatureSet,
    pub targets: [f64; HORIZONS],
}

/// Attach forward targets to each retained feature row.
///
/// Targets are looked up in the raw series by timestamp, so a target is
/// always the observation exactly `k` steps ahead — never a value at or
/// before the row's own timestamp. Rows missing any of the six forward
/// observations (the trailing rows of the series) are dropped: training must
/// never see a target drawn from outside the observed window.
pub fn build_targets(features: &[FeatureRow], series: &[RawObservation]) -> Vec<TrainingRow> {
    let by_time: HashMap<DateTime<Utc>, f64> = series
        .iter()
        .filter(|obs| obs.is_observed())
        .map(|obs| (obs.timestamp, obs.power_mw))
        .collect();

    features
        .iter()
        .filter_map(|row| {
            let mut targets = [0.0; HORIZONS];
            for k in 1..=HORIZONS {
                let ahead = row.timestamp + Duration::hours(k as i64);
                targets[k - 1] = *by_time.get(&ahead)?;
            }
            Some(TrainingRow {
                timestamp: row.timestamp,
                features: row.features,
                targets,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::features::derive_features;
    use chrono::TimeZone;

    fn hourly_series(values: &[f64]) -> Vec<RawObservation> {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RawObservation::new(start + chrono::Duration::hours(i as i64), *v))
            .collect()
    }

    #[test]
    fn ten_row_series_leaves_two_training_rows() {
        let series = hourly_series(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0, 15.0, 17.0, 18.0, 20.0]);
        let features = derive_features(&series);
        let rows = build_targets(&features, &series);

        // 8 feature rows minus the trailing 6 with an incomplete forward window.
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.timestamp, series[2].timestamp);
        assert_eq!(row.targets, [13.0, 14.0, 16.0, 15.0, 17.0, 18.0]);
    }

    #[test]
    fn targets_reference_strictly_future_values() {
        let series = hourly_series(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0, 15.0, 17.0, 18.0, 20.0]);
        let features = derive_features(&series);
        let rows = build_targets(&features, &series);

        for row in &rows {
            for (k, target) in row.targets.iter().enumerate() {
                let ahead = row.timestamp + Duration::hours(k as i64 + 1);
                let expected = series
                    .iter()
                    .find(|obs| obs.timestamp == ahead)
                    .map(|obs| obs.power_mw)
                    .unwrap();
                assert_eq!(*target, expected);
            }
        }
    }

    #[test]
    fn too_short_series_yields_no_training_rows() {
        // 8 rows < MIN_RAW_ROWS: feature trimming leaves 6, none with a full
        // forward window.
        let series = hourly_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let features = derive_features(&series);
        let rows = build_targets(&features, &series);
        assert!(rows.is_empty());
    }

    #[test]
    fn min_raw_rows_yields_exactly_one_training_row() {
        let values: Vec<f64> = (0..MIN_RAW_ROWS).map(|i| i as f64).collect();
        let series = hourly_series(&values);
        let rows = build_targets(&derive_features(&series), &series);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_forward_reading_drops_the_row() {
        // NaN at index 9: rows whose forward window covers it lose their
        // targets even though their own features are intact.
        let mut values: Vec<f64> = (0..16).map(|i| i as f64).collect();
        values[9] = f64::NAN;
        let series = hourly_series(&values);
        let features = derive_features(&series);
        let rows = build_targets(&features, &series);

        for row in &rows {
            let nan_ts = series[9].timestamp;
            let covers_gap = (1..=HORIZONS as i64)
                .any(|k| row.timestamp + Duration::hours(k) == nan_ts);
            assert!(!covers_gap);
            assert!(row.targets.iter().all(|t| t.is_finite()));
        }
    }
}
