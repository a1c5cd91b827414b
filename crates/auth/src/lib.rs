//! Password identities and bearer sessions for the Hirenup backend.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use cuid2::CuidConstructor;
use hirenup_config::AuthConfig;
use once_cell::sync::Lazy;
use rand::RngCore;
use serde::Serialize;
use sqlx::{SqlitePool, Transaction};
use thiserror::Error;
use tracing::info;

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i64,
    pub public_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Registers users, verifies credentials and resolves bearer tokens.
///
/// Cloning is cheap; every clone shares the same connection pool.
#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    session_ttl: Duration,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        Self {
            pool,
            session_ttl: Duration::seconds(config.session_ttl_seconds as i64),
        }
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Create a user with a password identity. The two rows are written in
    /// one transaction so a failed identity insert leaves no orphan user.
    pub async fn register_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(AuthError::UserExists);
        }

        let secret = hash_password(password)?;
        let user = self.create_user(&mut tx, email, display_name).await?;

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO user_identities (user_id, provider, provider_uid, secret, created_at, updated_at) \
             VALUES (?, 'password', ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(email)
        .bind(secret)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user = %user.public_id, "registered password identity");
        Ok(user)
    }

    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let identity: Option<(i64, String)> = sqlx::query_as(
            "SELECT user_id, secret FROM user_identities \
             WHERE provider = 'password' AND provider_uid = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some((user_id, secret)) = identity else {
            return Err(AuthError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(&secret)?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_session(user_id).await
    }

    /// Resolve a bearer token to its user. Expired sessions are removed on
    /// the way out so the table does not accumulate stale rows.
    pub async fn authenticate_token(&self, token: &str) -> Result<(User, AuthSession), AuthError> {
        let session: Option<(i64, String)> =
            sqlx::query_as("SELECT user_id, expires_at FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        let Some((user_id, expires_raw)) = session else {
            return Err(AuthError::SessionNotFound);
        };

        let expires_at = DateTime::parse_from_rfc3339(&expires_raw)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::SessionExpired);
        }

        let user = self.load_user(user_id).await?;
        Ok((
            user,
            AuthSession {
                token: token.to_owned(),
                user_id,
                expires_at,
            },
        ))
    }

    pub async fn user_profile(&self, user_id: i64) -> Result<User, AuthError> {
        self.load_user(user_id).await
    }

    pub async fn issue_session(&self, user_id: i64) -> Result<AuthSession, AuthError> {
        let token = new_session_token();
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        sqlx::query(
            "INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(now.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(AuthSession {
            token,
            user_id,
            expires_at,
        })
    }

    async fn create_user(
        &self,
        tx: &mut Transaction<'_, sqlx::Sqlite>,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        let public_id = new_public_id();
        let now = Utc::now().to_rfc3339();

        let inserted = sqlx::query(
            "INSERT INTO users (public_id, email, display_name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(email)
        .bind(display_name)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;

        Ok(User {
            id: inserted.last_insert_rowid(),
            public_id,
            email: Some(email.to_owned()),
            display_name: display_name.map(str::to_owned),
        })
    }

    async fn load_user(&self, id: i64) -> Result<User, AuthError> {
        let (public_id, email, display_name): (String, Option<String>, Option<String>) =
            sqlx::query_as("SELECT public_id, email, display_name FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(User {
            id,
            public_id,
            email,
            display_name,
        })
    }
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// 32 random bytes, URL-safe base64 without padding. Safe to put in an
/// Authorization header verbatim.
fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn new_public_id() -> String {
    CUID.create_id()
}
