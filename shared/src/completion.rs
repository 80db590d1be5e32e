//! Completion service client.
//!
//! The rewrite pipeline only needs one capability from the language model: turn a
//! prompt pair into text. [`CompletionService`] is that seam; [`OpenAiClient`] is the
//! production implementation against an OpenAI-compatible chat completions API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;
use crate::prompt::PromptPair;

/// Failures talking to the completion service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Non-success HTTP status; `body` is the raw upstream response text
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but no usable message text
    #[error("completion service returned no text")]
    Empty,

    /// Success status but the body was not a chat completion
    #[error("failed to parse completion response: {0}")]
    Decode(String),

    /// The request never produced a response
    #[error("completion request failed: {0}")]
    Transport(String),
}

/// Anything that can rewrite a prompt pair into text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion. Returns the trimmed text of the first choice.
    async fn complete(
        &self,
        api_key: &str,
        prompt: &PromptPair,
        temperature: f32,
    ) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Every layer may be absent or `null`; either way the answer is empty, not malformed.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Option<Choice>>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client backed by reqwest.
pub struct OpenAiClient {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    /// Create a new client for the given base URL and model.
    pub fn new(http_client: reqwest::Client, base_url: &str, model: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            reqwest::Client::new(),
            &config.openai_base_url,
            config.openai_model.clone(),
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a PromptPair, temperature: f32) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        prompt: &PromptPair,
        temperature: f32,
    ) -> Result<String, UpstreamError> {
        debug!(endpoint = %self.endpoint, model = %self.model, "Requesting completion");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt, temperature))
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Completion service failed: {} - {}", status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        extract_message(&body)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body, trimmed.
pub fn extract_message(body: &str) -> Result<String, UpstreamError> {
    let parsed: Option<ChatResponse> =
        serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    parsed
        .and_then(|response| response.choices)
        .and_then(|choices| choices.into_iter().next())
        .flatten()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(UpstreamError::Empty)
}
