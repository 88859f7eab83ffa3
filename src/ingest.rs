//! Raw data ingestion.
//!
//! The core's contract with the data source is only "an ordered sequence of
//! time-stamped raw observations"; this module fulfils it for CSV files with
//! `timestamp` and `power_mw` columns. Rows with a missing or unparsable
//! reading are kept as NaN so positional lags stay hour-aligned; the feature
//! deriver drops everything their windows touch.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::domain::RawObservation;
use crate::error::{ForecastError, Result};
use crate::pipeline::features::{derive_features, FeatureRow, ROLLING_WINDOW};

const TIMESTAMP_COLUMN: &str = "timestamp";
const VALUE_COLUMN: &str = "power_mw";

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Load the ordered raw series from a CSV source.
pub fn load_observations(path: &Path) -> Result<Vec<RawObservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            ForecastError::DataLoad(format!("failed to open '{}': {e}", path.display()))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| ForecastError::DataLoad(format!("failed to read header row: {e}")))?
        .clone();
    let ts_idx = headers
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or_else(|| {
            ForecastError::DataLoad(format!("missing required column '{TIMESTAMP_COLUMN}'"))
        })?;
    let value_idx = headers
        .iter()
        .position(|h| h == VALUE_COLUMN)
        .ok_or_else(|| {
            ForecastError::DataLoad(format!("missing required column '{VALUE_COLUMN}'"))
        })?;

    let mut series = Vec::new();
    let mut missing_values = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| ForecastError::DataLoad(format!("row {}: {e}", line + 2)))?;

        let raw_ts = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| {
            ForecastError::DataLoad(format!("row {}: unparsable timestamp '{raw_ts}'", line + 2))
        })?;

        let power_mw = record
            .get(value_idx)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        if !power_mw.is_finite() {
            missing_values += 1;
        }

        series.push(RawObservation::new(timestamp, power_mw));
    }

    if missing_values > 0 {
        warn!(
            rows = missing_values,
            source = %path.display(),
            "rows with missing production value"
        );
    }

    Ok(series)
}

/// The serving layer's `load_latest_feature_row` collaborator: the most
/// recent timestamp for which a full feature window exists.
pub fn latest_feature_row(path: &Path) -> Result<FeatureRow> {
    let series = load_observations(path)?;
    let got = series.len();
    derive_features(&series)
        .pop()
        .ok_or(ForecastError::InsufficientHistory {
            needed: ROLLING_WINDOW,
            got,
        })
}
