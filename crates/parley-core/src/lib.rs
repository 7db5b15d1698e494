//! Session logic for Parley.
//!
//! Contains the pieces of the interactive session that have real behavior of
//! their own: input completeness, the command grammar, the session variable
//! table, the file/URL enrichment pipeline, and the generation coordinator
//! with its progress indicator. Collaborators (filesystem, HTTP, LLM
//! backends, speech) are reached through the traits defined here and
//! implemented in `parley-infra`.

pub mod chat;
pub mod enrich;
pub mod generation;
pub mod llm;
pub mod output;
pub mod speech;
