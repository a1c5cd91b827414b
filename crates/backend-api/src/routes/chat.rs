use axum::{extract::State, http::HeaderMap, Json};
use hirenup_assistant::HistoryEntry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    services::chat::{self as chat_service, NewChatExchange},
    util::require_bearer,
    ApiError, AppState,
};

/// Optional throughout so validation can emit the contract's 400 body
/// instead of a deserialisation error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
    pub conversation_history: Option<Vec<HistoryItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryItem {
    pub role: String,
    pub content: String,
}

impl From<HistoryItem> for HistoryEntry {
    fn from(value: HistoryItem) -> Self {
        Self {
            role: value.role,
            content: value.content,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub chat_id: String,
}

#[utoipa::path(
    post,
    path = "/api/ai/chat",
    tag = "Assistant",
    security(("bearerAuth" = [])),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply with the stored chat id", body = ChatResponse),
        (status = 400, description = "Missing message or userId", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage or generation failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn ai_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let _ = state.authenticate(&token).await?;

    let message = payload.message.unwrap_or_default();
    let user_id = payload.user_id.unwrap_or_default();
    if message.trim().is_empty() || user_id.trim().is_empty() {
        return Err(ApiError::bad_request("Message and userId are required"));
    }

    let context = payload
        .context
        .map(|value| value.to_string())
        .unwrap_or_else(|| "{}".to_string());
    let history: Vec<HistoryEntry> = payload
        .conversation_history
        .unwrap_or_default()
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    let stored = chat_service::record_exchange(
        state.db_pool(),
        state.assistant(),
        NewChatExchange {
            message,
            user_public_id: user_id,
            project_public_id: payload.project_id,
            context,
            history,
        },
    )
    .await?;

    Ok(Json(ChatResponse {
        response: stored.response,
        chat_id: stored.chat_id,
    }))
}
