//! Speech synthesis capability.
//!
//! Used when the `voice` session toggle is on. The command-line
//! implementation lives in parley-infra.

use parley_types::error::SpeechError;

/// Speaks a complete response. Blocks until speech has finished.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Synthesizer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SpeechSynthesizer for Silent {
    fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}
