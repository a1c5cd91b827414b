//! Schema migrations embedded into the binary at compile time.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Apply any pending migrations. Safe to call on an up-to-date database.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!(
        migrations = MIGRATOR.migrations.len(),
        "database migrations applied"
    );
    Ok(())
}
