//! Anthropic Claude provider.
//!
//! [`AnthropicProvider`] implements
//! [`LlmProvider`](parley_core::llm::LlmProvider) over the Anthropic
//! Messages API.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
