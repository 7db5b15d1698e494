//! Chat configuration types for Parley.
//!
//! `ChatConfig` represents the `config.toml` that selects the generation
//! backend, overrides the system instruction, and tunes the session's
//! timeouts and rendering.

use serde::{Deserialize, Serialize};

use crate::llm::Vendor;

/// System instruction sent with every prompt unless overridden.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a funny assistant, you speak about: tech, tech news, STEAM topics. \
You do not talk about religion or politics.";

/// Top-level configuration for a chat session.
///
/// Loaded from `~/.parley/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Backend vendor selector (`anthropic`, `openai`, `ollama`, `openai_compatible`).
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// Model identifier. Empty means the vendor's default model.
    #[serde(default)]
    pub model: String,

    /// Base URL override for OpenAI-compatible endpoints.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// System instruction override.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Display name shown in the user prompt label.
    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: Option<f64>,

    /// Upper bound on a single generation call. `0` waits forever.
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,

    /// Timeout for each URL referenced in a prompt.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Render responses as terminal markdown before the typing effect.
    #[serde(default = "default_true")]
    pub render_markdown: bool,

    /// Command used for speech output (defaults to `say` or `espeak`).
    #[serde(default)]
    pub speech_command: Option<String>,
}

fn default_vendor() -> String {
    Vendor::Ollama.to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_generation_timeout_secs() -> u64 {
    300
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            vendor: default_vendor(),
            model: String::new(),
            base_url: None,
            api_key_env: None,
            system_prompt: None,
            user_name: None,
            max_tokens: default_max_tokens(),
            temperature: None,
            generation_timeout_secs: default_generation_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            render_markdown: true,
            speech_command: None,
        }
    }
}

impl ChatConfig {
    /// The system instruction for this session.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// The model to request, falling back to the vendor default.
    pub fn model_for(&self, vendor: Vendor) -> String {
        if self.model.trim().is_empty() {
            vendor.default_model().to_string()
        } else {
            self.model.trim().to_string()
        }
    }
}
