use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::prompts::ADVISOR_SYSTEM;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::conversation::Turn;

/// Answers general career questions.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn answer(&self, history: &[Turn], query: &str) -> Result<String, LlmError>;
}

/// Career-advisor persona over the chat model. The reply is passed through as is.
pub struct LlmAdvisor {
    model: Arc<dyn ChatModel>,
}

impl LlmAdvisor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn answer(&self, history: &[Turn], query: &str) -> Result<String, LlmError> {
        let reply = self.model.complete(ADVISOR_SYSTEM, history, query).await?;
        Ok(reply.trim().to_string())
    }
}
