use anyhow::Context;
use hirenup_backend_api::{build_router, AppState};
use hirenup_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = hirenup_config::load().context("failed to load configuration")?;
    info!("starting Hirenup backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;
    let state = AppState::new(
        services.db_pool.clone(),
        services.assistant.clone(),
        services.authenticator.clone(),
    );

    let bind_addr = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(address = %bind_addr, "http server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}
