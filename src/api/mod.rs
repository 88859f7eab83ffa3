pub mod error;
pub mod forecast;
pub mod health;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::store::{EnsembleCache, ModelStore};

/// Shared serving state: configuration plus the load-once ensemble cache.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub cache: Arc<EnsembleCache>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let store = ModelStore::new(&cfg.models.store_dir);
        Self {
            cfg: Arc::new(cfg),
            cache: Arc::new(EnsembleCache::new(store)),
        }
    }
}

pub fn router(state: AppState, cfg: &Config) -> Router {
    Router::new()
        .nest("/api/v1", v1_router(state))
        .layer(
            ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(
                cfg.server.request_timeout_secs,
            ))),
        )
        .layer(TraceLayer::new_for_http())
}

fn v1_router(state: AppState) -> Router {
    Router::new()
        .route("/forecast", get(forecast::get_forecast))
        .route("/health", get(health::health_check))
        .with_state(state)
}
