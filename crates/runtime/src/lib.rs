use std::sync::Arc;

use anyhow::{Context, Result};
use hirenup_assistant::Assistant;
use hirenup_auth::Authenticator;
use hirenup_config::AppConfig;
use hirenup_database::initialize_database;
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::{anyhow, Result};
    use tracing_subscriber::EnvFilter;

    /// Install the global tracing subscriber. Fails on a second call, so
    /// binaries invoke this exactly once at startup.
    pub fn init_tracing() -> Result<()> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|error| anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Shared services behind the HTTP layer. Cloning shares the pool and the
/// assistant engine.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub assistant: Arc<Assistant>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database).await?;
        let authenticator = Authenticator::new(db_pool.clone(), config.auth.clone());

        let assistant = Assistant::new(config)
            .bootstrap()
            .context("failed to bootstrap assistant")?;
        info!(generator = %assistant.active_generator(), "assistant ready");

        Ok(Self {
            db_pool,
            authenticator,
            assistant: Arc::new(assistant),
        })
    }
}

/// Resolves when the process receives ctrl-c.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => tracing::warn!(?error, "failed to listen for shutdown signal"),
    }
}
