//! Shared fixtures for service tests.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Creates a migrated test database backed by a temp directory.
pub async fn create_test_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .expect("open test database");
    MIGRATOR.run(&pool).await.expect("apply migrations");

    (pool, dir)
}

pub async fn create_test_user(
    pool: &SqlitePool,
    public_id: &str,
    email: Option<&str>,
    display_name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let inserted = sqlx::query(
        "INSERT INTO users (public_id, email, display_name, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(public_id)
    .bind(email)
    .bind(display_name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(inserted.last_insert_rowid())
}

pub async fn create_test_company(
    pool: &SqlitePool,
    public_id: &str,
    name: &str,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = sqlx::query(
        "INSERT INTO companies (public_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(public_id)
    .bind(name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn add_company_member(
    pool: &SqlitePool,
    company_id: i64,
    user_id: i64,
    role: &str,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = sqlx::query(
        "INSERT INTO company_members (company_id, user_id, role, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(company_id)
    .bind(user_id)
    .bind(role)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_test_project(
    pool: &SqlitePool,
    public_id: &str,
    entrepreneur_id: i64,
    name: &str,
    description: &str,
    budget: Option<f64>,
    industry: Option<&str>,
    status: &str,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = sqlx::query(
        r#"
        INSERT INTO projects (public_id, entrepreneur_id, name, description, budget, industry, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(public_id)
    .bind(entrepreneur_id)
    .bind(name)
    .bind(description)
    .bind(budget)
    .bind(industry)
    .bind(status)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn grant_permission(
    pool: &SqlitePool,
    user_id: i64,
    permission_type: &str,
    granted: bool,
    granter_id: i64,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = sqlx::query(
        r#"
        INSERT INTO permissions (public_id, user_id, type, granted, granter_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(permission_type)
    .bind(granted)
    .bind(granter_id)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn share_permission(
    pool: &SqlitePool,
    permission_id: i64,
    sharer_id: i64,
    shared_with_id: i64,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let id = sqlx::query(
        r#"
        INSERT INTO permission_shares (public_id, permission_id, sharer_id, shared_with_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(permission_id)
    .bind(sharer_id)
    .bind(shared_with_id)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}
