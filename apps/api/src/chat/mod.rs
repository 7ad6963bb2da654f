// Conversational job assistant: intent routing, slot-filling job search,
// career advice and greeting.
// All LLM calls go through llm_client::ChatModel; no direct API calls here.

use thiserror::Error;

use crate::jobs::LookupError;
use crate::llm_client::LlmError;
use crate::session::StoreError;

pub mod advisor;
pub mod controller;
pub mod criteria;
pub mod handlers;
pub mod intent;
pub mod prompts;
pub mod reasons;

/// Why a chat turn failed. Each stage keeps its own variant so failures can be
/// logged and tested separately; callers only ever see one generic message.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("intent classification failed: {0}")]
    Classification(#[source] LlmError),

    #[error("criteria extraction failed: {0}")]
    Extraction(#[source] LlmError),

    #[error("career advice failed: {0}")]
    Advice(#[source] LlmError),

    #[error("job lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("session store failed: {0}")]
    Session(#[from] StoreError),
}

impl ChatError {
    pub fn category(&self) -> &'static str {
        match self {
            ChatError::Classification(_) => "classification",
            ChatError::Extraction(_) => "extraction",
            ChatError::Advice(_) => "advice",
            ChatError::Lookup(_) => "lookup",
            ChatError::Session(_) => "session",
        }
    }

    /// True when the model endpoint could not be reached at all, as opposed to
    /// answering with an error status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ChatError::Classification(LlmError::Http(_))
                | ChatError::Extraction(LlmError::Http(_))
                | ChatError::Advice(LlmError::Http(_))
        )
    }
}
