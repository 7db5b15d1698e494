//! Animated "Thinking" indicator shown while a generation call is pending.
//!
//! The animation runs as its own tokio task. The only state it shares with
//! the coordinator is the running flag; the frame counter is local to the
//! task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::output::OutputSink;

/// Braille spinner glyphs, one per frame.
pub const THINKING_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Delay between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

const LABEL: &str = "Thinking";
const MAX_DOTS: u64 = 3;

/// Unstyled text of frame `frame`.
///
/// The glyph advances every frame. The dot count advances once per full
/// glyph cycle and wraps after three dots. Missing dots are padded with
/// spaces so every frame has the same width.
pub fn frame_text(frame: u64) -> String {
    let glyph = THINKING_FRAMES[(frame % THINKING_FRAMES.len() as u64) as usize];
    let (dots, padding) = dots_and_padding(frame);
    format!("{glyph} {LABEL}{dots}{padding}")
}

fn dots_and_padding(frame: u64) -> (String, String) {
    let dots = (frame / THINKING_FRAMES.len() as u64) % (MAX_DOTS + 1);
    (
        ".".repeat(dots as usize),
        " ".repeat((MAX_DOTS - dots) as usize),
    )
}

fn styled_frame(frame: u64) -> String {
    let glyph = THINKING_FRAMES[(frame % THINKING_FRAMES.len() as u64) as usize];
    let (dots, padding) = dots_and_padding(frame);
    format!(
        "{} {}",
        style(glyph).blue(),
        style(format!("{LABEL}{dots}{padding}")).blue().italic()
    )
}

/// Handle to a running indicator task.
pub struct ProgressIndicator {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ProgressIndicator {
    /// Spawn the animation loop. Each frame is written as a carriage return
    /// followed by the frame text.
    pub fn start(sink: OutputSink, interval: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = tokio::spawn(async move {
            let mut frame: u64 = 0;
            while flag.load(Ordering::Acquire) {
                if let Err(e) = sink.write_str(&format!("\r{}", styled_frame(frame))) {
                    debug!(error = %e, "progress indicator lost its output");
                    break;
                }
                frame += 1;
                tokio::time::sleep(interval).await;
            }
        });

        Self { running, handle }
    }

    /// Ask the loop to exit and wait up to `grace` for it. A loop still
    /// running after `grace` is aborted.
    ///
    /// Returns `true` if the loop exited on its own.
    pub async fn stop(self, grace: Duration) -> bool {
        self.running.store(false, Ordering::Release);

        let mut handle = self.handle;
        match tokio::time::timeout(grace, &mut handle).await {
            Ok(_) => true,
            Err(_) => {
                warn!(grace_ms = grace.as_millis() as u64, "progress indicator did not stop in time, aborting");
                handle.abort();
                false
            }
        }
    }

    /// Stop the loop immediately without waiting for the current frame.
    pub async fn cancel(self) {
        self.running.store(false, Ordering::Release);
        self.handle.abort();
        // Resolves as soon as the task observes the abort.
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_text_cycles_glyphs_then_dots() {
        assert_eq!(frame_text(0), "⣾ Thinking   ");
        assert_eq!(frame_text(1), "⣽ Thinking   ");
        assert_eq!(frame_text(7), "⣷ Thinking   ");
        assert_eq!(frame_text(8), "⣾ Thinking.  ");
        assert_eq!(frame_text(16), "⣾ Thinking.. ");
        assert_eq!(frame_text(24), "⣾ Thinking...");
        assert_eq!(frame_text(32), "⣾ Thinking   ");
    }

    #[test]
    fn test_frames_have_constant_width() {
        let width = frame_text(0).chars().count();
        for frame in 0..64 {
            assert_eq!(frame_text(frame).chars().count(), width);
        }
    }

    #[tokio::test]
    async fn test_indicator_animates_until_stopped() {
        let (sink, captured) = OutputSink::capture();
        let indicator = ProgressIndicator::start(sink, Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(indicator.stop(Duration::from_secs(1)).await);

        let text = console::strip_ansi_codes(&captured.contents()).into_owned();
        assert!(text.starts_with("\r⣾ Thinking"));
        assert!(text.contains("\r⣽ Thinking"));

        let frames = text.matches('\r').count();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(captured.contents().matches('\r').count(), frames);
    }

    #[tokio::test]
    async fn test_cancel_stops_output() {
        let (sink, captured) = OutputSink::capture();
        let indicator = ProgressIndicator::start(sink, Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;

        indicator.cancel().await;
        let after_cancel = captured.contents();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(captured.contents(), after_cancel);
    }
}
