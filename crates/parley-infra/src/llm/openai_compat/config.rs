//! Per-endpoint defaults for OpenAI-compatible providers.

/// Configuration for an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g. "openai", "ollama").
    pub provider_name: String,
    /// Base URL for the API (e.g. "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication. Local servers ignore it.
    pub api_key: String,
}

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

/// OpenAI, optionally through a different base URL.
pub fn openai_defaults(api_key: &str, base_url: Option<&str>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: base_url.unwrap_or(OPENAI_BASE_URL).into(),
        api_key: api_key.into(),
    }
}

/// A local Ollama server. No key required.
pub fn ollama_defaults(base_url: Option<&str>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "ollama".into(),
        base_url: base_url.unwrap_or(OLLAMA_BASE_URL).into(),
        api_key: "ollama".into(),
    }
}

/// Any other endpoint speaking the chat completions protocol.
pub fn compatible_defaults(api_key: &str, base_url: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai_compatible".into(),
        base_url: base_url.into(),
        api_key: api_key.into(),
    }
}
