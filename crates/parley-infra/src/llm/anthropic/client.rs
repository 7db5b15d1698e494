//! AnthropicProvider -- concrete [`LlmProvider`] implementation for Anthropic Claude.
//!
//! Sends requests to the Anthropic Messages API (`/v1/messages`). The API
//! key is wrapped in [`secrecy::SecretString`] and is never logged or
//! included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parley_core::llm::LlmProvider;
use parley_types::error::ConfigError;
use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use super::types::{AnthropicErrorBody, AnthropicMessage, AnthropicRequest, AnthropicResponse};

/// Anthropic Claude provider.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl AnthropicProvider {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(api_key: SecretString) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
        })
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_anthropic_request(request: &CompletionRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            messages: request
                .messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            system: request.system.clone(),
            temperature: request.temperature,
        }
    }
}

impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_anthropic_request(request);

        let response = self
            .client
            .post(self.url("/v1/messages"))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<AnthropicErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or(raw);
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(detail),
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                529 => LlmError::Overloaded(detail),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {detail}"),
                },
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(CompletionResponse {
            content: parsed.text(),
            id: parsed.id,
            model: parsed.model,
            usage: Usage {
                input_tokens: parsed.usage.input_tokens,
                output_tokens: parsed.usage.output_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider(base_url: &str) -> AnthropicProvider {
        AnthropicProvider::new(SecretString::from("test-key-not-real"))
            .unwrap()
            .with_base_url(base_url)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::single_turn("claude-sonnet-4-20250514", "Be helpful", "Hello", 1024, Some(0.7))
    }

    #[test]
    fn test_to_anthropic_request() {
        let req = AnthropicProvider::to_anthropic_request(&request());
        assert_eq!(req.model, "claude-sonnet-4-20250514");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.system.as_deref(), Some("Be helpful"));
        assert_eq!(req.temperature, Some(0.7));
    }

    #[test]
    fn test_base_url_override() {
        let provider = provider("http://localhost:8080/");
        assert_eq!(provider.url("/v1/messages"), "http://localhost:8080/v1/messages");
        assert_eq!(provider.name(), "anthropic");
    }

    #[tokio::test]
    async fn test_complete_sends_headers_and_parses_text() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-api-key"], "test-key-not-real");
                assert_eq!(headers["anthropic-version"], "2023-06-01");
                assert_eq!(body["system"], "Be helpful");
                Json(json!({
                    "id": "msg_1",
                    "content": [{"type": "text", "text": "Hi there"}],
                    "model": "claude-sonnet-4-20250514",
                    "stop_reason": "end_turn",
                    "usage": {"input_tokens": 5, "output_tokens": 2}
                }))
            }),
        );
        let base = serve(router).await;

        let response = provider(&base).complete(&request()).await.unwrap();
        assert_eq!(response.content, "Hi there");
        assert_eq!(response.usage.output_tokens, 2);
    }

    #[tokio::test]
    async fn test_complete_maps_error_statuses() {
        let router = Router::new()
            .route(
                "/auth/v1/messages",
                post(|| async { (StatusCode::UNAUTHORIZED, "nope") }),
            )
            .route(
                "/busy/v1/messages",
                post(|| async {
                    (
                        StatusCode::from_u16(529).unwrap(),
                        Json(json!({"type": "error", "error": {"type": "overloaded_error", "message": "Server busy"}})),
                    )
                }),
            );
        let base = serve(router).await;

        let err = provider(&format!("{base}/auth")).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));

        let err = provider(&format!("{base}/busy")).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Overloaded(ref m) if m == "Server busy"));
    }
}
