use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    api::{error::ApiError, response::ApiResponse, AppState},
    domain::ForecastResult,
    engine, ingest,
};

/// Six-hour-ahead forecast payload.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub generated_at: DateTime<Utc>,
    /// Timestamp of the feature row the forecast was computed from.
    pub feature_timestamp: DateTime<Utc>,
    /// Horizon labels aligned with `predictions`: `["t+1", .., "t+6"]`.
    pub horizons: Vec<String>,
    pub predictions: Vec<f64>,
}

/// GET /api/v1/forecast - Forecast the next six hours of production
///
/// Derives the latest feature row from the configured data source, applies
/// every horizon model in the cached ensemble to it, and returns the six
/// ordered point predictions.
pub async fn get_forecast(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastResponse>>, ApiError> {
    let latest = ingest::latest_feature_row(&state.cfg.data.source_path)?;
    let ensemble = state.cache.get_or_load()?;
    let result = engine::predict_all(&latest.features, &ensemble)?;

    Ok(Json(ApiResponse::success(ForecastResponse {
        generated_at: result.generated_at,
        feature_timestamp: latest.timestamp,
        horizons: ForecastResult::horizon_labels(),
        predictions: result.predictions,
    })))
}
