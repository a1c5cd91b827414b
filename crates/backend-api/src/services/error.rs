use std::fmt;

use hirenup_assistant::AssistantError;

#[derive(Debug)]
pub enum ServiceError {
    Database(sqlx::Error),
    Generation(AssistantError),
    Internal(String),
}

impl ServiceError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(error) => write!(f, "database error: {error}"),
            Self::Generation(error) => write!(f, "reply generation error: {error}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

// Clients only ever see the generic 500 body; the underlying cause is
// written to the log here before the detail is discarded.
impl From<ServiceError> for crate::ApiError {
    fn from(error: ServiceError) -> Self {
        tracing::error!("{error}");
        crate::ApiError::internal_server_error("Internal server error")
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database(error)
    }
}

impl From<AssistantError> for ServiceError {
    fn from(error: AssistantError) -> Self {
        Self::Generation(error)
    }
}
