/// LLM Client — the single point of entry for all model calls in the assistant.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Classification, extraction and advice all go through `ChatModel`.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::conversation::{Speaker, Turn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;
/// Routing and extraction must be repeatable for the same conversation.
const TEMPERATURE: f32 = 0.0;
/// Upper bound on attempts per call; backoff doubles per retry (1s, 2s).
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text in, text out. The only capability the dialogue layer needs from a model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Runs one completion with `system` instructions over the prior `history`
    /// followed by the new user `input`.
    async fn complete(&self, system: &str, history: &[Turn], input: &str)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration, max_attempts: u32) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
            max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS),
        })
    }

    /// Overrides the endpoint (proxies, and wiremock in tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Makes a raw call to the Messages API, returning the full response object.
    /// Retries on 429 and 5xx with exponential backoff while attempts remain.
    pub async fn call(
        &self,
        system: &str,
        history: &[Turn],
        input: &str,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: build_messages(history, input),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            attempts: self.max_attempts,
        }))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(
        &self,
        system: &str,
        history: &[Turn],
        input: &str,
    ) -> Result<String, LlmError> {
        let response = self.call(system, history, input).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// History as alternating user/assistant messages, then the new user message.
fn build_messages<'a>(history: &'a [Turn], input: &'a str) -> Vec<AnthropicMessage<'a>> {
    history
        .iter()
        .map(|turn| AnthropicMessage {
            role: match turn.speaker {
                Speaker::Human => "user",
                Speaker::Assistant => "assistant",
            },
            content: turn.text.as_str(),
        })
        .chain(std::iter::once(AnthropicMessage {
            role: "user",
            content: input,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, max_attempts: u32) -> LlmClient {
        LlmClient::new("test-api-key".into(), Duration::from_secs(5), max_attempts)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 12, "output_tokens": 3}
        })
    }

    #[test]
    fn test_build_messages_alternates_and_appends_input() {
        let history = vec![Turn::human("find jobs"), Turn::assistant("What role?")];
        let messages = build_messages(&history, "data analyst");

        let roles: Vec<&str> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
        assert_eq!(messages[2].content, "data analyst");
    }

    #[test]
    fn test_attempts_are_clamped() {
        let timeout = Duration::from_secs(1);
        let client = LlmClient::new("k".into(), timeout, 20).unwrap();
        assert_eq!(client.max_attempts, MAX_ATTEMPTS);
        let client = LlmClient::new("k".into(), timeout, 0).unwrap();
        assert_eq!(client.max_attempts, 1);
    }

    #[test]
    fn test_response_text_skips_non_text_blocks() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "thinking"},
                {"type": "text", "text": "job_search"}
            ],
            "usage": {"input_tokens": 1, "output_tokens": 1}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("job_search"));
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-api-key", "test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "system": "classify",
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("greeting")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 1);
        let text = client.complete("classify", &[], "hello").await.unwrap();
        assert_eq!(text, "greeting");
    }

    #[tokio::test]
    async fn test_single_attempt_does_not_retry_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 1);
        let err = client.complete("s", &[], "q").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_client_error_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 3);
        match client.complete("s", &[], "q").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_text_block_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [],
                "usage": {"input_tokens": 1, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 1);
        let err = client.complete("s", &[], "q").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
