//! Command plugin interface.
//!
//! A host CLI mounts a plugin by name under its parent path (`ai chat`).
//! `parley` is its own host: `main` builds the [`ChatPlugin`] from the
//! parsed arguments and runs it.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use parley_core::enrich::ReferenceExtractor;
use parley_core::generation::GenerationCoordinator;
use parley_core::output::OutputSink;
use parley_infra::filesystem::{history_path, LocalFileSource};
use parley_infra::http::ReqwestFetcher;
use parley_infra::speech::CommandSpeech;

use super::chat::input::EditorInput;
use super::chat::loop_runner::run_chat_loop;
use super::chat::renderer::{MarkdownRenderer, ResponseRenderer};
use super::chat::session::{
    resolve_user_name, BackendFactory, ConfigBackendFactory, PromptLabels, Session,
};

/// A command a host CLI can mount.
pub trait CommandPlugin {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Command path the plugin is mounted under, outermost first.
    fn parents(&self) -> &[&str];

    fn run(self) -> impl Future<Output = anyhow::Result<()>>;
}

/// The interactive chat session as a plugin.
#[derive(Debug, Clone)]
pub struct ChatPlugin {
    factory: ConfigBackendFactory,
    history_path: PathBuf,
}

impl ChatPlugin {
    pub fn new(factory: ConfigBackendFactory) -> Self {
        Self {
            factory,
            history_path: history_path(),
        }
    }
}

impl CommandPlugin for ChatPlugin {
    fn name(&self) -> &str {
        "chat"
    }

    fn description(&self) -> &str {
        "Interactive AI chat"
    }

    fn parents(&self) -> &[&str] {
        &["ai"]
    }

    /// Build the session from config and run it until `exit`.
    ///
    /// Fails before the loop starts if the backend cannot be configured or
    /// the terminal line editor cannot be initialized.
    async fn run(self) -> anyhow::Result<()> {
        let config = self.factory.load_config().await;
        let backend = self
            .factory
            .create()
            .await
            .context("failed to configure the generation backend")?;

        let fetcher = ReqwestFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
        let generation_timeout = (config.generation_timeout_secs > 0)
            .then(|| Duration::from_secs(config.generation_timeout_secs));

        let out = OutputSink::stdout();
        let markdown = config.render_markdown.then(MarkdownRenderer::new);
        let speech = Arc::new(CommandSpeech::from_config(config.speech_command.as_deref()));
        let labels = PromptLabels::new(
            &resolve_user_name(config.user_name.as_deref(), |key| std::env::var(key).ok()),
            &config.vendor,
        );

        let mut input = EditorInput::new(self.history_path)?;
        let mut session = Session::new(
            out.clone(),
            backend,
            Box::new(self.factory),
            ReferenceExtractor::new(LocalFileSource::new(), fetcher),
            labels,
        )
        .with_coordinator(GenerationCoordinator::new(out.clone()).with_timeout(generation_timeout))
        .with_renderer(ResponseRenderer::new(out, speech).with_markdown(markdown));

        run_chat_loop(&mut session, &mut input).await
    }
}
