//! Interrupt sources for in-flight work.
//!
//! While the line editor is active, Ctrl+C is handled by the editor. While a
//! prompt is being enriched, generated or typed out, the loop races the work
//! against an [`InterruptSource`].

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

/// A future that resolves when the user asks to stop the current operation.
pub type Interrupt<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

pub trait InterruptSource: Send + Sync {
    fn interrupted(&self) -> Interrupt<'_>;
}

/// Resolves on SIGINT / Ctrl+C.
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlC;

impl InterruptSource for CtrlC {
    fn interrupted(&self) -> Interrupt<'_> {
        Box::pin(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
    }
}

/// Never resolves.
#[derive(Debug, Default, Clone, Copy)]
pub struct Never;

impl InterruptSource for Never {
    fn interrupted(&self) -> Interrupt<'_> {
        Box::pin(std::future::pending())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_never_stays_pending() {
        let result = tokio::time::timeout(Duration::from_millis(20), Never.interrupted()).await;
        assert!(result.is_err());
    }
}
