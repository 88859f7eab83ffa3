use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One measured production reading per hour.
///
/// The series an observation belongs to is read-only input: ordered by
/// timestamp ascending, pre-cleaned upstream. A missing reading is carried as
/// NaN so that positional lag features stay aligned; the feature deriver
/// drops every row whose window touches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub timestamp: DateTime<Utc>,
    pub power_mw: f64,
}

impl RawObservation {
    pub fn new(timestamp: DateTime<Utc>, power_mw: f64) -> Self {
        Self {
            timestamp,
            power_mw,
        }
    }

    /// Whether the reading carries a usable value.
    pub fn is_observed(&self) -> bool {
        self.power_mw.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn nan_reading_is_not_observed() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(RawObservation::new(ts, 42.0).is_observed());
        assert!(!RawObservation::new(ts, f64::NAN).is_observed());
        assert!(!RawObservation::new(ts, f64::INFINITY).is_observed());
    }
}
