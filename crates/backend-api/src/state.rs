use std::sync::Arc;

use hirenup_assistant::Assistant;
use hirenup_auth::{AuthSession, Authenticator, User};
use sqlx::SqlitePool;

use crate::ApiError;

/// Everything a request handler needs, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    assistant: Arc<Assistant>,
    authenticator: Authenticator,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        assistant: Arc<Assistant>,
        authenticator: Authenticator,
    ) -> Self {
        Self {
            db_pool,
            assistant,
            authenticator,
        }
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Resolve a bearer token into the user and session it belongs to.
    /// Auth failures surface as the uniform 401 response.
    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }
}
