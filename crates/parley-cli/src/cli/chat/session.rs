//! Chat session state.
//!
//! A [`Session`] owns everything the loop needs between turns: the variable
//! table, the active backend and the factory that rebuilds it for `:new`,
//! the enrichment pipeline, the generation coordinator, the renderer, and
//! the prompt labels computed at startup.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use console::style;
use tracing::debug;

use parley_core::chat::variables::Variables;
use parley_core::enrich::ReferenceExtractor;
use parley_core::generation::{ActiveBackend, GenerationCoordinator};
use parley_core::output::OutputSink;
use parley_core::speech::Silent;
use parley_infra::config::load_effective_config;
use parley_infra::llm::create_backend;
use parley_types::config::ChatConfig;

use super::banner::print_banner;
use super::renderer::ResponseRenderer;
use super::screen::{ScreenClearer, TerminalScreen};
use super::signal::{CtrlC, InterruptSource};

/// Blank lines printed when the screen cannot be cleared.
const CLEAR_FALLBACK_LINES: usize = 50;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Builds a fresh generation backend for `:new`.
pub trait BackendFactory: Send + Sync {
    fn create(&self) -> BoxFuture<'_, anyhow::Result<ActiveBackend>>;
}

/// Re-reads the config file on every call, then applies environment and
/// command-line overrides.
#[derive(Debug, Clone)]
pub struct ConfigBackendFactory {
    config_path: PathBuf,
    vendor: Option<String>,
    model: Option<String>,
}

impl ConfigBackendFactory {
    pub fn new(config_path: PathBuf, vendor: Option<String>, model: Option<String>) -> Self {
        Self {
            config_path,
            vendor,
            model,
        }
    }

    pub async fn load_config(&self) -> ChatConfig {
        let mut config = load_effective_config(&self.config_path).await;
        if let Some(vendor) = &self.vendor {
            config.vendor = vendor.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config
    }
}

impl BackendFactory for ConfigBackendFactory {
    fn create(&self) -> BoxFuture<'_, anyhow::Result<ActiveBackend>> {
        Box::pin(async move {
            let config = self.load_config().await;
            let backend = create_backend(&config, |key| std::env::var(key).ok())?;
            Ok(backend)
        })
    }
}

/// Styled prompt labels, computed once per session.
#[derive(Debug, Clone)]
pub struct PromptLabels {
    user: String,
    assistant: String,
}

impl PromptLabels {
    pub fn new(user_name: &str, vendor: &str) -> Self {
        let user = style(format!(" {} ", user_name.to_uppercase()))
            .black()
            .on_blue()
            .on_bright()
            .to_string();
        let assistant = style(format!(" {} ", vendor.to_uppercase()))
            .black()
            .on_green()
            .on_bright()
            .to_string();
        Self { user, assistant }
    }

    /// The line-editor prompt: the user label on its own line.
    pub fn user_prompt(&self) -> String {
        format!("{}\n", self.user)
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }
}

/// Display name for the user label: the configured name, else `$USER` or
/// `$USERNAME`, else `you`.
pub fn resolve_user_name(
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    let usable = |name: &str| {
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    };
    configured
        .and_then(usable)
        .or_else(|| lookup("USER").as_deref().and_then(usable))
        .or_else(|| lookup("USERNAME").as_deref().and_then(usable))
        .unwrap_or_else(|| "you".to_string())
}

pub struct Session<F, U> {
    pub(super) variables: Variables,
    pub(super) backend: ActiveBackend,
    pub(super) factory: Box<dyn BackendFactory>,
    pub(super) extractor: ReferenceExtractor<F, U>,
    pub(super) coordinator: GenerationCoordinator,
    pub(super) renderer: ResponseRenderer,
    pub(super) screen: Box<dyn ScreenClearer>,
    pub(super) interrupts: Box<dyn InterruptSource>,
    pub(super) labels: PromptLabels,
    pub(super) out: OutputSink,
}

impl<F, U> Session<F, U> {
    /// A session writing to `out`, with a terminal screen, Ctrl+C interrupts
    /// and silent speech until configured otherwise.
    pub fn new(
        out: OutputSink,
        backend: ActiveBackend,
        factory: Box<dyn BackendFactory>,
        extractor: ReferenceExtractor<F, U>,
        labels: PromptLabels,
    ) -> Self {
        Self {
            variables: Variables::new(),
            backend,
            factory,
            extractor,
            coordinator: GenerationCoordinator::new(out.clone()),
            renderer: ResponseRenderer::new(out.clone(), Arc::new(Silent)),
            screen: Box::new(TerminalScreen),
            interrupts: Box::new(CtrlC),
            labels,
            out,
        }
    }

    pub fn with_coordinator(mut self, coordinator: GenerationCoordinator) -> Self {
        self.coordinator = coordinator;
        self
    }

    pub fn with_renderer(mut self, renderer: ResponseRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_screen(mut self, screen: Box<dyn ScreenClearer>) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_interrupts(mut self, interrupts: Box<dyn InterruptSource>) -> Self {
        self.interrupts = interrupts;
        self
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn backend(&self) -> &ActiveBackend {
        &self.backend
    }

    pub fn labels(&self) -> &PromptLabels {
        &self.labels
    }

    /// Clear the terminal and reprint the banner.
    ///
    /// When clearing is not possible, old content is scrolled away with
    /// blank lines and a note is printed instead.
    pub(super) fn clear_screen(&self) -> std::io::Result<()> {
        if let Err(e) = self.screen.clear() {
            debug!(error = %e, "screen clear unavailable, scrolling instead");
            self.out.write_str(&"\n".repeat(CLEAR_FALLBACK_LINES))?;
            self.out.line(
                &style("Note: Screen clearing may not work perfectly in all terminals")
                    .red()
                    .to_string(),
            )?;
        }
        print_banner(&self.out)
    }
}
