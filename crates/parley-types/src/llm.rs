//! LLM request/response types for Parley.
//!
//! These types model the data shapes for generation backend interactions:
//! completion requests, responses, usage tracking, vendor selection, and
//! error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a request. Chat turns are single-shot, so there are
/// no assistant messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request to a generation backend.
///
/// A chat turn always carries exactly one user message (the enriched prompt)
/// plus the system instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// Build a single-turn request from a system instruction and user text.
    pub fn single_turn(
        model: impl Into<String>,
        system: impl Into<String>,
        user_text: impl Into<String>,
        max_tokens: u32,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message {
                role: MessageRole::User,
                content: user_text.into(),
            }],
            system: Some(system.into()),
            max_tokens,
            temperature,
        }
    }
}

/// Response from a generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: Usage,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("generation timed out after {0}s")]
    Timeout(u64),
}

/// Generation backend vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl Vendor {
    /// Model used when the configuration leaves `model` empty.
    pub fn default_model(&self) -> &'static str {
        match self {
            Vendor::Anthropic => "claude-sonnet-4-20250514",
            Vendor::OpenAi | Vendor::OpenAiCompatible => "gpt-4o-mini",
            Vendor::Ollama => "llama3.2",
        }
    }

    /// Environment variable holding the API key, if the vendor needs one.
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            Vendor::Anthropic => Some("ANTHROPIC_API_KEY"),
            Vendor::OpenAi | Vendor::OpenAiCompatible => Some("OPENAI_API_KEY"),
            Vendor::Ollama => None,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Anthropic => write!(f, "anthropic"),
            Vendor::OpenAi => write!(f, "openai"),
            Vendor::Ollama => write!(f, "ollama"),
            Vendor::OpenAiCompatible => write!(f, "openai_compatible"),
        }
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Vendor::Anthropic),
            "openai" => Ok(Vendor::OpenAi),
            "ollama" => Ok(Vendor::Ollama),
            "openai_compatible" | "openai-compatible" => Ok(Vendor::OpenAiCompatible),
            other => Err(format!("invalid vendor: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_str() {
        assert_eq!("anthropic".parse::<Vendor>().unwrap(), Vendor::Anthropic);
        assert_eq!("Claude".parse::<Vendor>().unwrap(), Vendor::Anthropic);
        assert_eq!("OPENAI".parse::<Vendor>().unwrap(), Vendor::OpenAi);
        assert_eq!("ollama".parse::<Vendor>().unwrap(), Vendor::Ollama);
        assert_eq!(
            "openai-compatible".parse::<Vendor>().unwrap(),
            Vendor::OpenAiCompatible
        );
        assert!("jlama".parse::<Vendor>().is_err());
    }

    #[test]
    fn test_vendor_display_matches_from_str() {
        for vendor in [
            Vendor::Anthropic,
            Vendor::OpenAi,
            Vendor::Ollama,
            Vendor::OpenAiCompatible,
        ] {
            assert_eq!(vendor.to_string().parse::<Vendor>().unwrap(), vendor);
        }
    }

    #[test]
    fn test_ollama_needs_no_key() {
        assert!(Vendor::Ollama.default_api_key_env().is_none());
        assert_eq!(
            Vendor::Anthropic.default_api_key_env(),
            Some("ANTHROPIC_API_KEY")
        );
    }

    #[test]
    fn test_single_turn_request() {
        let req = CompletionRequest::single_turn("m", "be brief", "hello", 256, None);
        assert_eq!(req.system.as_deref(), Some("be brief"));
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, MessageRole::User);
        assert_eq!(req.messages[0].content, "hello");

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Timeout(300);
        assert_eq!(err.to_string(), "generation timed out after 300s");
    }
}
