//! Intent routing — decides which dialogue path handles a query.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::prompts::{INTENT_PROMPT_TEMPLATE, INTENT_SYSTEM};
use crate::llm_client::prompts::LABEL_ONLY_INSTRUCTION;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::conversation::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    JobSearch,
    GeneralQuestion,
    Greeting,
}

impl Intent {
    pub fn as_label(self) -> &'static str {
        match self {
            Intent::JobSearch => "job_search",
            Intent::GeneralQuestion => "general_question",
            Intent::Greeting => "greeting",
        }
    }

    /// Maps a raw model reply onto a label.
    ///
    /// The reply is split into word tokens (letters, digits, `_`); the first
    /// token that is exactly a label wins. Returns `None` if no token is a label.
    pub fn from_label(raw: &str) -> Option<Intent> {
        raw.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .find_map(|token| match token {
                "job_search" => Some(Intent::JobSearch),
                "general_question" => Some(Intent::GeneralQuestion),
                "greeting" => Some(Intent::Greeting),
                _ => None,
            })
    }
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, history: &[Turn], query: &str) -> Result<Intent, LlmError>;
}

/// Asks the model for a single label. Unrecognised replies fall back to `Greeting`.
pub struct LlmIntentClassifier {
    model: Arc<dyn ChatModel>,
    system: String,
}

impl LlmIntentClassifier {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            system: format!("{INTENT_SYSTEM}{LABEL_ONLY_INSTRUCTION}"),
        }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, history: &[Turn], query: &str) -> Result<Intent, LlmError> {
        let prompt = INTENT_PROMPT_TEMPLATE.replace("{query}", query);
        let reply = self.model.complete(&self.system, history, &prompt).await?;

        Ok(Intent::from_label(&reply).unwrap_or_else(|| {
            debug!(reply = %reply.trim(), "unrecognised intent label; treating as greeting");
            Intent::Greeting
        }))
    }
}
