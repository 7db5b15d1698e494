//! Command-line speech synthesis.
//!
//! Pipes the response text to an external program: `say` on macOS,
//! `espeak` elsewhere, or whatever `speech_command` names in the config.

use std::process::{Command, Stdio};

use parley_core::speech::SpeechSynthesizer;
use parley_types::error::SpeechError;

/// Speaks text by running an external command with the text as its last
/// argument.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
}

impl CommandSpeech {
    /// The platform's default synthesizer.
    pub fn platform_default() -> Self {
        let program = if cfg!(target_os = "macos") { "say" } else { "espeak" };
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    /// Parse a configured command line such as `espeak -s 150`.
    ///
    /// Falls back to the platform default when `command` is blank.
    pub fn from_command_line(command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        match words.next() {
            Some(program) => Self {
                program,
                args: words.collect(),
            },
            None => Self::platform_default(),
        }
    }

    /// Build from the optional `speech_command` config value.
    pub fn from_config(command: Option<&str>) -> Self {
        command.map_or_else(Self::platform_default, Self::from_command_line)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        tracing::debug!(program = %self.program, chars = text.len(), "speaking response");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                tracing::debug!(program = %self.program, error = %e, "failed to launch synthesizer");
                SpeechError::Unavailable(self.program.clone())
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed(status.code().unwrap_or(-1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line_splits_args() {
        let speech = CommandSpeech::from_command_line("espeak -s 150");
        assert_eq!(speech.program(), "espeak");
        assert_eq!(speech.args, vec!["-s", "150"]);
    }

    #[test]
    fn test_blank_command_uses_platform_default() {
        let speech = CommandSpeech::from_config(Some("   "));
        assert_eq!(speech.program(), CommandSpeech::platform_default().program());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let speech = CommandSpeech::from_command_line("parley-no-such-synthesizer-binary");
        let err = speech.speak("hello").unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(ref p) if p == "parley-no-such-synthesizer-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        assert!(CommandSpeech::from_command_line("true").speak("hi").is_ok());
        let err = CommandSpeech::from_command_line("false").speak("hi").unwrap_err();
        assert!(matches!(err, SpeechError::Failed(1)));
    }
}
