//! Input handling primitives for the chat session loop.

pub mod command;
pub mod completeness;
pub mod variables;
