//! Database access for the Hirenup backend.
//!
//! This crate owns connection management and schema migrations. Query code
//! lives with the services that use it.

use hirenup_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod migrations;

pub use connection::prepare_database;
pub use migrations::run_migrations;

/// Open the configured database and bring its schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let pool = prepare_database(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
