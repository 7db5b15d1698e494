//! LlmProvider trait definition.
//!
//! The generation backend seen by the session: one prompt in, one complete
//! response out. Implementations live in parley-infra
//! (`AnthropicProvider`, `OpenAiCompatibleProvider`).

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT). Wrap an implementation in
/// [`BoxLlmProvider`](super::BoxLlmProvider) to select it at runtime.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "anthropic", "ollama").
    fn name(&self) -> &str;

    /// Send a completion request and wait for the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
