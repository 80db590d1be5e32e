//! Message clean-up endpoint.
//!
//! Trims a message without calling the completion service. Browser clients use it as a
//! cheap fallback when rewriting is unavailable.

use lambda_http::{Body, Request, Response};
use tracing::{info, warn};

use crate::http::{error_response, json_response, method_gate, parse_json_body};
use crate::models::{CleanRequest, CleanResponse};
use crate::{Error, Result};

/// Handles POST /api/clean.
#[derive(Debug, Default)]
pub struct CleanHandler;

impl CleanHandler {
    pub async fn handle(&self, event: Request) -> std::result::Result<Response<Body>, lambda_http::Error> {
        if let Some(response) = method_gate(event.method()) {
            return response;
        }

        match clean(event.body()) {
            Ok(cleaned) => {
                info!(bytes = cleaned.len(), "Message cleaned");
                json_response(200, &CleanResponse { cleaned })
            }
            Err(e) => {
                warn!("Clean rejected: {}", e);
                error_response(&e)
            }
        }
    }
}

fn clean(body: &Body) -> Result<String> {
    let request: CleanRequest = parse_json_body(body)?;
    request
        .message
        .map(|message| message.trim().to_string())
        .ok_or_else(|| Error::MissingFields(vec!["message"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn request(method: &str, body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri("/api/clean")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn test_trims_message() {
        let response = CleanHandler
            .handle(request("POST", r#"{"message": "  hello host \n"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!({"cleaned": "hello host"}));
    }

    #[tokio::test]
    async fn test_rejects_missing_or_non_string_message() {
        let response = CleanHandler.handle(request("POST", "{}")).await.unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Missing required fields: message");

        let response = CleanHandler
            .handle(request("POST", r#"{"message": 42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_method_handling() {
        let response = CleanHandler.handle(request("OPTIONS", "")).await.unwrap();
        assert_eq!(response.status(), 204);

        let response = CleanHandler.handle(request("GET", "")).await.unwrap();
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["allow"], "POST, OPTIONS");
    }
}
