use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::ApiError;

// The API contract keeps 401 bodies uniform, so every rejection here
// carries the same message regardless of what was wrong with the header.
pub fn require_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("Bearer") => {
            Ok(token.to_string())
        }
        _ => Err(ApiError::unauthorized("Unauthorized")),
    }
}
