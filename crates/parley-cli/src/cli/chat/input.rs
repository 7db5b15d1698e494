//! Line input for the chat loop.
//!
//! [`EditorInput`] wraps a `rustyline` editor with persistent history and tab
//! completion of command words and file paths. The loop only sees the
//! [`LineSource`] trait, so tests can script their input.

use std::path::PathBuf;

use anyhow::Context as _;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use tracing::{debug, warn};

/// Words offered when completing at the start of a line.
pub const COMMAND_WORDS: &[&str] = &[":clear", ":help", ":new", ":var", ":vars", "exit"];

/// Events produced by a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A submitted line, without its newline.
    Line(String),
    /// End of input (Ctrl+D).
    Eof,
    /// Line editing was interrupted (Ctrl+C).
    Interrupted,
}

/// Where the session loop reads user input from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<InputEvent>;

    /// Called once when the session ends.
    fn finish(&mut self) {}
}

/// Terminal line editor with history at `history_path`.
pub struct EditorInput {
    editor: Editor<ChatHelper, FileHistory>,
    history_path: PathBuf,
}

impl EditorInput {
    pub fn new(history_path: PathBuf) -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .build();
        let mut editor = Editor::<ChatHelper, FileHistory>::with_config(config)
            .context("failed to initialize terminal line editor")?;
        editor.set_helper(Some(ChatHelper::new()));

        if let Err(e) = editor.load_history(&history_path) {
            debug!(path = %history_path.display(), error = %e, "no history loaded");
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<InputEvent> {
        let line = tokio::task::block_in_place(|| self.editor.readline(prompt));
        match line {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        debug!(error = %e, "failed to record history entry");
                    }
                }
                Ok(InputEvent::Line(line))
            }
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(e) => Err(e).context("failed to read input line"),
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.editor.save_history(&self.history_path) {
            warn!(path = %self.history_path.display(), error = %e, "failed to save history");
        }
    }
}

/// Completion helper: command words first, file paths after them.
pub struct ChatHelper {
    files: FilenameCompleter,
}

impl ChatHelper {
    pub fn new() -> Self {
        Self {
            files: FilenameCompleter::new(),
        }
    }
}

impl Default for ChatHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete a command word when the cursor is still in the first word.
///
/// Returns `None` once the line contains whitespace before `pos`.
pub fn complete_command(line: &str, pos: usize) -> Option<(usize, Vec<Pair>)> {
    let partial = &line[..pos];
    if partial.contains(char::is_whitespace) {
        return None;
    }
    let lower = partial.to_lowercase();
    let matches = COMMAND_WORDS
        .iter()
        .filter(|word| word.starts_with(&lower))
        .map(|word| Pair {
            display: word.to_string(),
            replacement: word.to_string(),
        })
        .collect();
    Some((0, matches))
}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match complete_command(line, pos) {
            Some((start, matches)) if !matches.is_empty() => Ok((start, matches)),
            _ => self.files.complete(line, pos, ctx),
        }
    }
}

impl Hinter for ChatHelper {
    type Hint = String;
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {
    fn validate(&self, _ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for ChatHelper {}
