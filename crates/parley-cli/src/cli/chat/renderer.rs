//! Response rendering.
//!
//! [`ResponseRenderer`] prints a generated response under the assistant's
//! label with a typing effect, then hands it to speech synthesis when the
//! `voice` toggle is on. [`MarkdownRenderer`] optionally formats the text
//! first: `termimad` for prose and `syntect` for fenced code blocks.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use tracing::warn;

use parley_core::chat::variables::Variables;
use parley_core::output::OutputSink;
use parley_core::speech::SpeechSynthesizer;

/// Time budget for typing out one line, split evenly across its words.
pub const LINE_BUDGET: Duration = Duration::from_millis(100);

/// Pause after each typed line.
pub const LINE_PAUSE: Duration = Duration::from_millis(10);

const CODE_THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct MarkdownRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown response.
    ///
    /// Code fences with a language tag are highlighted via syntect; everything
    /// else is rendered through termimad.
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            let fence = line.trim_start().starts_with("```");
            if fence && !in_code_block {
                in_code_block = true;
                code_lang = line.trim().trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if fence {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints responses with the typing effect and speaks them when asked.
pub struct ResponseRenderer {
    out: OutputSink,
    markdown: Option<MarkdownRenderer>,
    speech: Arc<dyn SpeechSynthesizer>,
    line_budget: Duration,
    line_pause: Duration,
}

impl ResponseRenderer {
    pub fn new(out: OutputSink, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            out,
            markdown: None,
            speech,
            line_budget: LINE_BUDGET,
            line_pause: LINE_PAUSE,
        }
    }

    pub fn with_markdown(mut self, markdown: Option<MarkdownRenderer>) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn with_pacing(mut self, line_budget: Duration, line_pause: Duration) -> Self {
        self.line_budget = line_budget;
        self.line_pause = line_pause;
        self
    }

    /// Print `response` under `label`.
    ///
    /// With `text` on, words are typed out line by line; `interrupt` cuts the
    /// typing short. With `voice` on, the full response is spoken afterwards.
    /// Speech failures are reported and never end the session.
    pub async fn display<I>(
        &self,
        label: &str,
        response: &str,
        variables: &Variables,
        interrupt: I,
    ) -> std::io::Result<()>
    where
        I: Future<Output = ()>,
    {
        self.out.line("")?;
        self.out.line(label)?;

        if variables.text_enabled() {
            let body = match &self.markdown {
                Some(markdown) => markdown.render(response),
                None => response.to_string(),
            };
            tokio::select! {
                typed = self.type_out(body.trim_end_matches('\n')) => typed?,
                () = interrupt => {
                    warn!("Typing display interrupted");
                    self.out.line("")?;
                }
            }
        }

        if variables.voice_enabled() {
            self.speak(response).await?;
        }

        self.out.line("")
    }

    async fn type_out(&self, text: &str) -> std::io::Result<()> {
        for line in text.split('\n') {
            let words: Vec<&str> = line.split(' ').collect();
            let per_word = self.line_budget / words.len().max(1) as u32;
            for word in words {
                self.out.write_str(&format!("{word} "))?;
                tokio::time::sleep(per_word).await;
            }
            self.out.line("")?;
            tokio::time::sleep(self.line_pause).await;
        }
        Ok(())
    }

    async fn speak(&self, response: &str) -> std::io::Result<()> {
        let speech = Arc::clone(&self.speech);
        let text = response.to_string();
        let spoken = tokio::task::spawn_blocking(move || speech.speak(&text)).await;

        let failure = match spoken {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        warn!(error = %failure, "speech output failed");
        self.out
            .line(&style(format!("Speech unavailable: {failure}")).yellow().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use parley_types::error::SpeechError;

    use super::*;

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<String>>,
        fail: bool,
    }

    impl SpeechSynthesizer for RecordingSpeech {
        fn speak(&self, text: &str) -> Result<(), SpeechError> {
            if self.fail {
                return Err(SpeechError::Unavailable("espeak".to_string()));
            }
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn renderer(out: OutputSink, speech: Arc<RecordingSpeech>) -> ResponseRenderer {
        ResponseRenderer::new(out, speech).with_pacing(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_types_words_line_by_line() {
        let (out, captured) = OutputSink::capture();
        let speech = Arc::new(RecordingSpeech::default());

        renderer(out, Arc::clone(&speech))
            .display("AI", "hello there\nsecond line", &Variables::new(), std::future::pending())
            .await
            .unwrap();

        assert_eq!(
            captured.contents(),
            "\nAI\nhello there \nsecond line \n\n"
        );
        assert!(speech.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_off_voice_on_speaks_only() {
        let (out, captured) = OutputSink::capture();
        let speech = Arc::new(RecordingSpeech::default());
        let mut vars = Variables::new();
        vars.set("text", "false");
        vars.set("voice", "true");

        renderer(out, Arc::clone(&speech))
            .display("AI", "spoken reply", &vars, std::future::pending())
            .await
            .unwrap();

        assert_eq!(captured.contents(), "\nAI\n\n");
        assert_eq!(*speech.spoken.lock().unwrap(), vec!["spoken reply".to_string()]);
    }

    #[tokio::test]
    async fn test_speech_failure_is_reported_not_fatal() {
        let (out, captured) = OutputSink::capture();
        let speech = Arc::new(RecordingSpeech {
            fail: true,
            ..Default::default()
        });
        let mut vars = Variables::new();
        vars.set("voice", "true");

        let result = renderer(out, speech)
            .display("AI", "hi", &vars, std::future::pending())
            .await;

        assert!(result.is_ok());
        let text = console::strip_ansi_codes(&captured.contents()).into_owned();
        assert!(text.contains("hi \n"));
        assert!(text.contains("Speech unavailable"));
    }

    #[tokio::test]
    async fn test_interrupt_stops_typing() {
        let (out, captured) = OutputSink::capture();
        let long = vec!["word"; 50].join("\n");

        ResponseRenderer::new(out, Arc::new(RecordingSpeech::default()))
            .with_pacing(Duration::from_millis(20), Duration::ZERO)
            .display(
                "AI",
                &long,
                &Variables::new(),
                tokio::time::sleep(Duration::from_millis(50)),
            )
            .await
            .unwrap();

        let typed = captured.contents().matches("word").count();
        assert!(typed < 50, "typing was not interrupted ({typed} words)");
    }

    #[test]
    fn test_markdown_highlights_code_fence() {
        let rendered = MarkdownRenderer::new().render("```rust\nfn main() {}\n```");
        let plain = console::strip_ansi_codes(&rendered).into_owned();
        assert!(plain.contains("--- rust ---"));
        assert!(plain.contains("fn main() {}"));
    }
}
