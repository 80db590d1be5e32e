//! Guest message rewrite pipeline.
//!
//! method gate → credential check → body parse → required fields → prompt → one
//! completion call → `{ message }`. Any failure ends the request with a JSON error; nothing
//! is retried.

use std::sync::Arc;

use lambda_http::{Body, Request, Response};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::completion::{CompletionService, OpenAiClient};
use crate::config::Config;
use crate::http::{error_response, json_response, method_gate, parse_json_body};
use crate::models::{MessageBody, RewriteRequest};
use crate::prompt::PromptSpec;
use crate::{Error, Result};

/// Handles POST /api/rewrite for one prompt variant.
pub struct RewriteHandler {
    spec: PromptSpec,
    api_key: Option<String>,
    completion: Arc<dyn CompletionService>,
}

impl RewriteHandler {
    pub fn new(config: &Config, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            spec: config.prompt_spec.clone(),
            api_key: config.openai_api_key.clone(),
            completion,
        }
    }

    /// Handler wired to the real completion service.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, Arc::new(OpenAiClient::from_config(config)))
    }

    pub async fn handle(&self, event: Request) -> std::result::Result<Response<Body>, lambda_http::Error> {
        if let Some(response) = method_gate(event.method()) {
            return response;
        }

        let span = info_span!("rewrite", request_id = %Uuid::new_v4(), variant = self.spec.name);
        match self.rewrite(event.body()).instrument(span).await {
            Ok(message) => json_response(200, &MessageBody { message }),
            Err(e) => {
                if e.status_code() >= 500 {
                    error!("Rewrite failed: {}", e);
                } else {
                    warn!("Rewrite rejected: {}", e);
                }
                error_response(&e)
            }
        }
    }

    /// Run the pipeline on a raw request body, returning the rewritten message.
    pub async fn rewrite(&self, body: &Body) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Unconfigured("missing OPENAI_API_KEY".to_string()))?;

        debug!(body = %String::from_utf8_lossy(body.as_ref()), "Rewrite request body");
        let request: RewriteRequest = parse_json_body(body)?;

        let missing = self.spec.missing_fields(&request);
        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        let prompt = self.spec.build(&request);
        debug!(style = %request.style, user_prompt = %prompt.user, "Prompt built");

        let message = self
            .completion
            .complete(api_key, &prompt, self.spec.temperature)
            .await?;
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyResponse);
        }

        info!(bytes = message.len(), "Rewrite complete");
        Ok(message.to_string())
    }
}
