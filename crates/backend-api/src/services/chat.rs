use hirenup_assistant::{Assistant, HistoryEntry, ProjectSnapshot};
use sqlx::{Row, SqlitePool};

use super::error::ServiceError;

/// Inputs for one assistant exchange, already validated by the route layer.
#[derive(Debug)]
pub struct NewChatExchange {
    pub message: String,
    pub user_public_id: String,
    pub project_public_id: Option<String>,
    pub context: String,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug)]
pub struct StoredExchange {
    pub response: String,
    pub chat_id: String,
}

/// Persist the user's message, generate the assistant reply and persist it.
///
/// The two inserts are deliberately not wrapped in a transaction: when reply
/// generation fails after the user row was written, the question stays on
/// record and the client may retry.
pub async fn record_exchange(
    pool: &SqlitePool,
    assistant: &Assistant,
    exchange: NewChatExchange,
) -> Result<StoredExchange, ServiceError> {
    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE public_id = ?")
        .bind(&exchange.user_public_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            ServiceError::internal(format!(
                "chat request references unknown user {}",
                exchange.user_public_id
            ))
        })?;

    insert_chat_row(pool, user_id, &exchange, "user", None).await?;

    let project = match &exchange.project_public_id {
        Some(public_id) => fetch_project_snapshot(pool, public_id).await?,
        None => None,
    };

    let response = assistant
        .reply(&exchange.message, project.as_ref(), &exchange.history)
        .await?;

    let chat_id = insert_chat_row(pool, user_id, &exchange, "assistant", Some(&response)).await?;

    Ok(StoredExchange { response, chat_id })
}

/// A chat may name a project that was deleted or never existed; the
/// assistant then answers without project details.
async fn fetch_project_snapshot(
    pool: &SqlitePool,
    public_id: &str,
) -> Result<Option<ProjectSnapshot>, ServiceError> {
    let row = sqlx::query(
        "SELECT name, description, budget, industry, status FROM projects WHERE public_id = ?",
    )
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    let snapshot = match row {
        Some(row) => Some(ProjectSnapshot {
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            budget: row.try_get("budget")?,
            industry: row.try_get("industry")?,
            status: row.try_get("status")?,
        }),
        None => None,
    };

    Ok(snapshot)
}

async fn insert_chat_row(
    pool: &SqlitePool,
    user_id: i64,
    exchange: &NewChatExchange,
    message_type: &str,
    response: Option<&str>,
) -> Result<String, ServiceError> {
    let public_id = cuid2::create_id();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO ai_chats (public_id, user_id, project_id, message, response, message_type, context, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&public_id)
    .bind(user_id)
    .bind(&exchange.project_public_id)
    .bind(&exchange.message)
    .bind(response)
    .bind(message_type)
    .bind(&exchange.context)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(public_id)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::test_utils::{create_test_db, create_test_project, create_test_user};
    use hirenup_assistant::{AssistantError, ChatPrompt, ReplyGenerator};
    use hirenup_config::{AppConfig, AssistantConfig};

    struct FailingGenerator;

    #[async_trait::async_trait]
    impl ReplyGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &ChatPrompt<'_>) -> Result<String, AssistantError> {
            Err(AssistantError::Generation("generator offline".to_string()))
        }
    }

    fn template_assistant() -> Assistant {
        Assistant::new(&AppConfig::default())
            .bootstrap()
            .expect("template generator should bootstrap")
    }

    fn exchange(message: &str, user: &str, project: Option<&str>) -> NewChatExchange {
        NewChatExchange {
            message: message.to_string(),
            user_public_id: user.to_string(),
            project_public_id: project.map(str::to_string),
            context: "{}".to_string(),
            history: Vec::new(),
        }
    }

    async fn chat_rows(pool: &SqlitePool) -> Vec<(String, String, Option<String>, String)> {
        sqlx::query_as::<_, (String, String, Option<String>, String)>(
            "SELECT public_id, message_type, response, context FROM ai_chats ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .expect("chat rows should load")
    }

    #[tokio::test]
    async fn record_exchange_persists_question_and_reply() {
        let (pool, _dir) = create_test_db().await;
        let assistant = template_assistant();
        create_test_user(&pool, "user-1", Some("asli@example.com"), Some("Aslı"))
            .await
            .expect("user fixture");

        let stored = record_exchange(&pool, &assistant, exchange("Merhaba", "user-1", None))
            .await
            .expect("exchange should be recorded");

        let rows = chat_rows(&pool).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, "user");
        assert_eq!(rows[0].2, None);
        assert_eq!(rows[1].1, "assistant");
        assert_eq!(rows[1].2.as_deref(), Some(stored.response.as_str()));
        assert_eq!(stored.chat_id, rows[1].0);
        assert!(stored
            .response
            .starts_with("Merhaba! Projeniz hakkında size nasıl yardımcı olabilirim?"));
    }

    #[tokio::test]
    async fn record_exchange_embeds_project_budget_in_reply() {
        let (pool, _dir) = create_test_db().await;
        let assistant = template_assistant();
        let user_id = create_test_user(&pool, "user-1", None, None)
            .await
            .expect("user fixture");
        create_test_project(
            &pool,
            "proj-1",
            user_id,
            "Mobil Uygulama",
            "Sipariş takibi",
            Some(50_000.0),
            Some("Teknoloji"),
            "ACTIVE",
        )
        .await
        .expect("project fixture");

        let stored = record_exchange(
            &pool,
            &assistant,
            exchange("Bütçe planlaması nasıl olmalı?", "user-1", Some("proj-1")),
        )
        .await
        .expect("exchange should be recorded");

        assert!(stored.response.contains("₺50.000"));
        let rows = chat_rows(&pool).await;
        let project_ids = sqlx::query_scalar::<_, Option<String>>(
            "SELECT project_id FROM ai_chats ORDER BY id",
        )
        .fetch_all(&pool)
        .await
        .expect("project ids should load");
        assert_eq!(rows.len(), 2);
        assert_eq!(project_ids, vec![Some("proj-1".into()), Some("proj-1".into())]);
    }

    #[tokio::test]
    async fn record_exchange_tolerates_unknown_project() {
        let (pool, _dir) = create_test_db().await;
        let assistant = template_assistant();
        create_test_user(&pool, "user-1", None, None)
            .await
            .expect("user fixture");

        let stored = record_exchange(
            &pool,
            &assistant,
            exchange("Bütçe ne kadar olmalı?", "user-1", Some("missing-project")),
        )
        .await
        .expect("unknown project should not fail the exchange");

        // Without a project snapshot the budget template asks for one.
        assert!(stored
            .response
            .contains("Bütçenizi belirtirseniz, size daha spesifik öneriler sunabilirim."));
        let rows = chat_rows(&pool).await;
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn generation_failure_keeps_the_user_row() {
        let (pool, _dir) = create_test_db().await;
        let assistant =
            Assistant::with_generator(AssistantConfig::default(), Arc::new(FailingGenerator));
        create_test_user(&pool, "user-1", None, None)
            .await
            .expect("user fixture");

        let error = record_exchange(&pool, &assistant, exchange("Merhaba", "user-1", None))
            .await
            .expect_err("failing generator should surface");

        assert!(matches!(error, ServiceError::Generation(_)));
        let rows = chat_rows(&pool).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, "user");
    }

    #[tokio::test]
    async fn record_exchange_rejects_unknown_user_without_writing() {
        let (pool, _dir) = create_test_db().await;
        let assistant = template_assistant();

        let error = record_exchange(&pool, &assistant, exchange("Merhaba", "ghost", None))
            .await
            .expect_err("unknown user should fail");

        assert!(matches!(error, ServiceError::Internal(_)));
        assert!(chat_rows(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn record_exchange_stores_context_on_both_rows() {
        let (pool, _dir) = create_test_db().await;
        let assistant = template_assistant();
        create_test_user(&pool, "user-1", None, None)
            .await
            .expect("user fixture");

        let mut request = exchange("Merhaba", "user-1", None);
        request.context = r#"{"source":"mobile"}"#.to_string();
        request.history = vec![HistoryEntry {
            role: "user".to_string(),
            content: "Selam".to_string(),
        }];

        record_exchange(&pool, &assistant, request)
            .await
            .expect("exchange should be recorded");

        let rows = chat_rows(&pool).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].3, r#"{"source":"mobile"}"#);
        assert_eq!(rows[1].3, r#"{"source":"mobile"}"#);
    }
}
