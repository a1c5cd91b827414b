use axum::{extract::State, http::HeaderMap, Json};
use hirenup_auth::{AuthSession, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{util::require_bearer, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

impl SessionResponse {
    fn issued(user: User, session: AuthSession) -> Self {
        let expires_at = session.expires_at.to_rfc3339();
        Self {
            token: session.token,
            user: user.into(),
            expires_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            name: user.display_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created and session issued", body = SessionResponse),
        (status = 400, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let authenticator = state.authenticator();
    let user = authenticator
        .register_with_password(&payload.email, &payload.password, payload.name.as_deref())
        .await?;
    let session = authenticator.issue_session(user.id).await?;

    Ok(Json(SessionResponse::issued(user, session)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 401, description = "Unknown email or wrong password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let authenticator = state.authenticator();
    let session = authenticator
        .login_with_password(&payload.email, &payload.password)
        .await?;
    let user = authenticator.user_profile(session.user_id).await?;

    Ok(Json(SessionResponse::issued(user, session)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current session user", body = CurrentUserResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _session) = state.authenticate(&token).await?;

    Ok(Json(CurrentUserResponse { user: user.into() }))
}
