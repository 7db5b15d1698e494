//! Shared domain types for Parley.
//!
//! This crate contains the provider-agnostic types used across the Parley
//! chat session: configuration, LLM request/response shapes, and the error
//! types surfaced by the infrastructure collaborators.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
