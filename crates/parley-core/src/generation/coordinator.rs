//! Generation coordinator.
//!
//! Runs one backend call with the progress indicator animating beside it:
//!
//! 1. start the indicator task
//! 2. spawn the backend call (optionally bounded by a timeout)
//! 3. wait for the call or for the interrupt signal
//! 4. stop the indicator within a grace period, aborting it if needed
//! 5. blank the indicator line
//!
//! A failed call yields [`FALLBACK_MESSAGE`]. Only an interrupt is reported
//! to the caller as an error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parley_types::llm::{CompletionRequest, LlmError};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::indicator::{FRAME_INTERVAL, ProgressIndicator};
use crate::enrich::EnrichedPrompt;
use crate::llm::BoxLlmProvider;
use crate::output::OutputSink;

/// Reply shown when the backend fails or times out.
pub const FALLBACK_MESSAGE: &str = "Ops! Can you try again?";

/// How long a stopped indicator gets to exit before it is aborted.
pub const STOP_GRACE: Duration = Duration::from_secs(1);

/// Blanks written over the indicator line.
const CLEAR_WIDTH: usize = 30;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation was interrupted")]
    Interrupted,
}

/// The session's generation backend handle: a provider plus the fixed
/// request parameters every prompt is sent with.
#[derive(Clone, Debug)]
pub struct ActiveBackend {
    provider: Arc<BoxLlmProvider>,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl ActiveBackend {
    pub fn new(
        provider: BoxLlmProvider,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            model: model.into(),
            system_prompt: system_prompt.into(),
            max_tokens: 4096,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_for(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest::single_turn(
            self.model.clone(),
            self.system_prompt.clone(),
            prompt,
            self.max_tokens,
            self.temperature,
        )
    }
}

/// Overlaps a backend call with the progress indicator.
#[derive(Debug, Clone)]
pub struct GenerationCoordinator {
    sink: OutputSink,
    frame_interval: Duration,
    stop_grace: Duration,
    timeout: Option<Duration>,
}

impl GenerationCoordinator {
    pub fn new(sink: OutputSink) -> Self {
        Self {
            sink,
            frame_interval: FRAME_INTERVAL,
            stop_grace: STOP_GRACE,
            timeout: None,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }

    /// Bound each backend call. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `prompt` to `backend` and return the generated text, or
    /// [`FALLBACK_MESSAGE`] if the call failed.
    ///
    /// If `interrupt` resolves first, the call and the indicator are
    /// cancelled and [`GenerationError::Interrupted`] is returned.
    pub async fn generate<I>(
        &self,
        backend: &ActiveBackend,
        prompt: &EnrichedPrompt,
        interrupt: I,
    ) -> Result<String, GenerationError>
    where
        I: Future<Output = ()>,
    {
        let indicator = ProgressIndicator::start(self.sink.clone(), self.frame_interval);

        let provider = Arc::clone(&backend.provider);
        let request = backend.request_for(prompt.as_str());
        let timeout = self.timeout;
        let mut call = tokio::spawn(async move {
            let pending = provider.complete(&request);
            match timeout {
                Some(limit) => tokio::time::timeout(limit, pending)
                    .await
                    .unwrap_or_else(|_| Err(LlmError::Timeout(limit.as_secs()))),
                None => pending.await,
            }
        });

        let mut interrupt = std::pin::pin!(interrupt);
        let joined = tokio::select! {
            joined = &mut call => joined,
            () = &mut interrupt => {
                call.abort();
                indicator.cancel().await;
                self.clear_line();
                warn!(provider = backend.provider_name(), "generation interrupted");
                return Err(GenerationError::Interrupted);
            }
        };

        indicator.stop(self.stop_grace).await;
        self.clear_line();

        match joined {
            Ok(Ok(response)) => {
                debug!(
                    provider = backend.provider_name(),
                    model = %response.model,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "generation complete"
                );
                Ok(response.content)
            }
            Ok(Err(e)) => {
                warn!(provider = backend.provider_name(), error = %e, "generation failed");
                Ok(FALLBACK_MESSAGE.to_string())
            }
            Err(e) => {
                error!(provider = backend.provider_name(), error = %e, "generation task failed");
                Ok(FALLBACK_MESSAGE.to_string())
            }
        }
    }

    fn clear_line(&self) {
        let blank = format!("\r{}\r", " ".repeat(CLEAR_WIDTH));
        if let Err(e) = self.sink.write_str(&blank) {
            debug!(error = %e, "failed to clear indicator line");
        }
    }
}
