//! Database connection management

use anyhow::{Context, Result};
use hirenup_config::DatabaseConfig;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::info;

const STARTUP_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON",
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
];

/// Open the configured SQLite database, creating the backing file when it
/// does not exist yet.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    for pragma in STARTUP_PRAGMAS {
        sqlx::query(pragma)
            .execute(&pool)
            .await
            .with_context(|| format!("could not apply {pragma}"))?;
    }

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(raw_path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    if raw_path == ":memory:" {
        return Ok(());
    }

    let path = Path::new(raw_path);
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("could not create sqlite directory {}", parent.display()))?;
    }

    if fs::metadata(path).await.is_err() {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("could not create sqlite file {}", path.display()))?;
    }

    Ok(())
}
