use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    model_store: ComponentHealth,
    data_source: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            error: Some(error),
        }
    }
}

/// GET /api/v1/health - Health check endpoint
///
/// Reports whether the model artifacts and the raw data source are in place.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let model_store = if state.cache.store().is_complete() {
        ComponentHealth::healthy()
    } else {
        ComponentHealth::unhealthy(format!(
            "missing artifacts under {}",
            state.cache.store().dir().display()
        ))
    };

    let data_source = if state.cfg.data.source_path.exists() {
        ComponentHealth::healthy()
    } else {
        ComponentHealth::unhealthy(format!(
            "data source {} not found",
            state.cfg.data.source_path.display()
        ))
    };

    let all_healthy =
        model_store.status == "healthy" && data_source.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: chrono::Utc::now(),
        checks: HealthChecks {
            model_store,
            data_source,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_health_healthy() {
        let health = ComponentHealth::healthy();
        assert_eq!(health.status, "healthy");
        assert!(health.error.is_none());
    }

    #[test]
    fn test_component_health_unhealthy() {
        let health = ComponentHealth::unhealthy("missing artifacts".to_string());
        assert_eq!(health.status, "unhealthy");
        assert_eq!(health.error, Some("missing artifacts".to_string()));
    }
}
