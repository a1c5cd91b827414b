use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hirenup_auth::AuthError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Wire shape of every error body: `{"error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler failure carrying the status and the client-visible message.
/// Internal detail never travels in here; it is logged at the conversion
/// sites below.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(error = ?error, "internal error");
        Self::internal_server_error("Internal server error")
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        error!(error = ?error, "auth error");
        match error {
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession => Self::unauthorized("Unauthorized"),
            AuthError::UserExists => Self::bad_request(error.to_string()),
            AuthError::Database(_) | AuthError::PasswordHash(_) => {
                Self::internal_server_error("Internal server error")
            }
        }
    }
}
