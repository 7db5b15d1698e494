//! CLI definitions for the `parley` binary.
//!
//! `parley` takes no subcommands: it starts an interactive chat session.
//! Flags select the config file, override the backend, and tune logging.

pub mod chat;
pub mod plugin;

use std::path::PathBuf;

use clap::Parser;

/// Chat with an AI assistant from your terminal.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (default: ~/.parley/config.toml).
    #[arg(long, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend vendor (anthropic, openai, ollama, openai_compatible).
    #[arg(long)]
    pub vendor: Option<String>,

    /// Model identifier for the selected vendor.
    #[arg(long)]
    pub model: Option<String>,

    /// Suppress all log events except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logging (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log to stderr instead of `<data dir>/parley.log`.
    #[arg(long)]
    pub log_stderr: bool,
}
