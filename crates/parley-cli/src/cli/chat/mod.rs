//! Interactive chat session.
//!
//! Provides the line editor, the session loop, command handling, banner and
//! response rendering for `parley`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod screen;
pub mod session;
pub mod signal;
