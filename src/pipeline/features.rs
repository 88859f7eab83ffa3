//! Feature engineering for the forecasting models.
//!
//! Turns the raw production series into enriched feature rows: calendar
//! features from the timestamp plus lag and rolling-mean context.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RawObservation;

/// Number of lag features (`lag_1`, `lag_2`).
pub const LAG_STEPS: usize = 2;

/// Trailing rolling-mean window, covering `{t-2, t-1, t}`.
pub const ROLLING_WINDOW: usize = 3;

/// Canonical feature column order. Training and serving both read features
/// through [`FeatureSet::to_vector`], so this order is the only one that
/// ever reaches a regressor.
pub const FEATURE_NAMES: [&str; 6] = [
    "hour_of_day",
    "day_of_week",
    "month",
    "lag_1",
    "lag_2",
    "rolling_mean_3",
];

/// Derived features for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Hour of day (0-23)
    pub hour_of_day: u32,
    /// Day of week (0=Monday, 6=Sunday)
    pub day_of_week: u32,
    /// Month (1-12)
    pub month: u32,
    /// Production one hour earlier
    pub lag_1: f64,
    /// Production two hours earlier
    pub lag_2: f64,
    /// Mean production over the trailing 3-hour window
    pub rolling_mean_3: f64,
}

impl FeatureSet {
    /// Flatten into the canonical [`FEATURE_NAMES`] column order.
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.hour_of_day as f64,
            self.day_of_week as f64,
            self.month as f64,
            self.lag_1,
            self.lag_2,
            self.rolling_mean_3,
        ]
    }

    /// True when every field holds a usable number.
    pub fn is_finite(&self) -> bool {
        self.lag_1.is_finite() && self.lag_2.is_finite() && self.rolling_mean_3.is_finite()
    }
}

/// One retained timestamp: its raw value plus the derived features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub timestamp: DateTime<Utc>,
    pub power_mw: f64,
    pub features: FeatureSet,
}

/// Derive feature rows from an ordered raw series.
///
/// Pure transformation: the caller's series is never touched. Rows whose lag
/// or rolling window is incomplete (the first two of the series) and rows
/// whose window contains a missing reading are dropped, not imputed —
/// backfilling would hand the model values it never legitimately observed.
pub fn derive_features(series: &[RawObservation]) -> Vec<FeatureRow> {
    let mut rows = Vec::with_capacity(series.len().saturating_sub(LAG_STEPS));

    for (i, obs) in series.iter().enumerate() {
        if i < LAG_STEPS {
            continue;
        }
        let lag_1 = series[i - 1].power_mw;
        let lag_2 = series[i - 2].power_mw;
        if !obs.power_mw.is_finite() || !lag_1.is_finite() || !lag_2.is_finite() {
            continue;
        }

        let rolling_mean_3 = (lag_2 + lag_1 + obs.power_mw) / ROLLING_WINDOW as f64;
        let ts = obs.timestamp;
        rows.push(FeatureRow {
            timestamp: ts,
            power_mw: obs.power_mw,
            features: FeatureSet {
                hour_of_day: ts.hour(),
                day_of_week: ts.weekday().num_days_from_monday(),
                month: ts.month(),
                lag_1,
                lag_2,
                rolling_mean_3,
            },
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn hourly_series(values: &[f64]) -> Vec<RawObservation> {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RawObservation::new(start + chrono::Duration::hours(i as i64), *v))
            .collect()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(10, 8)]
    fn retains_all_but_the_first_two_rows(#[case] len: usize, #[case] expected: usize) {
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        assert_eq!(derive_features(&hourly_series(&values)).len(), expected);
    }

    #[test]
    fn first_two_rows_are_dropped() {
        let series = hourly_series(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0, 15.0, 17.0, 18.0, 20.0]);
        let rows = derive_features(&series);

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].timestamp, series[2].timestamp);
    }

    #[test]
    fn lag_and_rolling_values_match_raw_series() {
        let series = hourly_series(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0, 15.0, 17.0, 18.0, 20.0]);
        let rows = derive_features(&series);

        // Row for raw value 11 at series index 2.
        let row = &rows[0];
        assert_eq!(row.power_mw, 11.0);
        assert_eq!(row.features.lag_1, 12.0);
        assert_eq!(row.features.lag_2, 10.0);
        assert_eq!(row.features.rolling_mean_3, (10.0 + 12.0 + 11.0) / 3.0);
    }

    #[test]
    fn calendar_features_come_from_the_timestamp() {
        // 2024-03-04 is a Monday.
        let series = hourly_series(&[1.0, 2.0, 3.0, 4.0]);
        let rows = derive_features(&series);

        assert_eq!(rows[0].features.hour_of_day, 2);
        assert_eq!(rows[0].features.day_of_week, 0);
        assert_eq!(rows[0].features.month, 3);
    }

    #[test]
    fn missing_reading_poisons_its_whole_window() {
        let series = hourly_series(&[10.0, 12.0, f64::NAN, 13.0, 14.0, 16.0, 15.0]);
        let rows = derive_features(&series);

        // Index 2 (own value), 3 and 4 (lag window) all go; 5 and 6 survive.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, series[5].timestamp);
        assert!(rows.iter().all(|r| r.features.is_finite()));
    }

    #[test]
    fn caller_series_is_untouched() {
        let series = hourly_series(&[10.0, 12.0, 11.0, 13.0]);
        let before = series.clone();
        let _ = derive_features(&series);
        assert_eq!(series, before);
    }

    #[test]
    fn vector_order_matches_feature_names() {
        let set = FeatureSet {
            hour_of_day: 5,
            day_of_week: 1,
            month: 7,
            lag_1: 2.0,
            lag_2: 3.0,
            rolling_mean_3: 4.0,
        };
        let vector = set.to_vector();
        assert_eq!(vector.len(), FEATURE_NAMES.len());
        assert_eq!(vector, vec![5.0, 1.0, 7.0, 2.0, 3.0, 4.0]);
    }
}
