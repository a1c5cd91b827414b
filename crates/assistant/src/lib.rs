use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use hirenup_config::{AppConfig, AssistantConfig};

pub mod prompt;
pub mod templates;

pub use prompt::{ChatPrompt, HistoryEntry, ProjectSnapshot, SYSTEM_PROMPT};
pub use templates::TemplateReplyGenerator;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("reply generator not initialised")]
    GeneratorMissing,
    #[error("unknown reply generator {0:?}")]
    UnknownGenerator(String),
    #[error("reply generation failed: {0}")]
    Generation(String),
}

/// Produces the assistant reply for a composed prompt.
///
/// Async because real implementations call out to an LLM service; the
/// shipping template generator resolves immediately.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, AssistantError>;
}

pub struct Assistant {
    config: AssistantConfig,
    generator: Option<Arc<dyn ReplyGenerator>>,
}

impl Assistant {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.assistant.clone(),
            generator: None,
        }
    }

    /// Build an assistant around an explicit generator, bypassing the
    /// configured lookup.
    pub fn with_generator(config: AssistantConfig, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            config,
            generator: Some(generator),
        }
    }

    /// Resolve the configured reply generator. Unknown names fail startup.
    pub fn bootstrap(mut self) -> Result<Self, AssistantError> {
        let generator: Arc<dyn ReplyGenerator> = match self.config.generator.as_str() {
            "template" => Arc::new(TemplateReplyGenerator::new()),
            other => return Err(AssistantError::UnknownGenerator(other.to_string())),
        };

        info!(generator = %self.config.generator, "assistant reply generator initialised");
        self.generator = Some(generator);
        Ok(self)
    }

    pub fn active_generator(&self) -> &str {
        &self.config.generator
    }

    /// Compose the prompts for a user question and delegate to the generator.
    pub async fn reply(
        &self,
        message: &str,
        project: Option<&ProjectSnapshot>,
        history: &[HistoryEntry],
    ) -> Result<String, AssistantError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(AssistantError::GeneratorMissing)?;

        let prompt = ChatPrompt::compose(message, project, history);
        generator.generate(&prompt).await
    }
}
