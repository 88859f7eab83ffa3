use anyhow::Result;
use energy_forecaster::{api, config::Config, telemetry};
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    let state = api::AppState::new(cfg.clone());

    if !state.cache.store().is_complete() {
        warn!(
            dir = %cfg.models.store_dir.display(),
            "model artifacts missing; run the trainer before requesting forecasts"
        );
    }

    let app = api::router(state, &cfg);
    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting energy production forecast service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
