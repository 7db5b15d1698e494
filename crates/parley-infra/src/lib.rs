//! Infrastructure implementations for Parley.
//!
//! Concrete collaborators behind the traits in `parley-core`: the config
//! loader, the local filesystem source, the `reqwest` URL fetcher, the
//! Anthropic and OpenAI-compatible generation providers, and the
//! command-line speech synthesizer.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod llm;
pub mod speech;
