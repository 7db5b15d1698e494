//! Main chat loop.
//!
//! Reads input (with continuation lines while brackets are open or a line
//! ends in `\`), runs session commands, and sends everything else through
//! enrichment, generation and rendering. Errors from one turn are printed
//! and the loop moves on to the next prompt.

use console::style;
use tracing::{debug, info, warn};

use parley_core::chat::command;
use parley_core::chat::completeness::is_complete;
use parley_core::enrich::{FileSource, UrlFetcher};
use parley_core::generation::GenerationError;

use super::commands::{self, LoopControl};
use super::input::{InputEvent, LineSource};
use super::session::Session;

/// Prompt shown while input is incomplete.
pub const CONTINUATION_PROMPT: &str = "... ";

/// Printed on `exit` and end-of-input.
pub const GOODBYE: &str = "Goodbye! ';'";

/// Run the session until `exit` or end-of-input.
///
/// Only failures to read from `input` end the loop early.
pub async fn run_chat_loop<F, U>(
    session: &mut Session<F, U>,
    input: &mut dyn LineSource,
) -> anyhow::Result<()>
where
    F: FileSource,
    U: UrlFetcher,
{
    session.clear_screen()?;
    info!(
        provider = session.backend.provider_name(),
        model = session.backend.model(),
        "chat session started"
    );

    let result = drive(session, input).await;
    input.finish();
    result
}

async fn drive<F, U>(session: &mut Session<F, U>, input: &mut dyn LineSource) -> anyhow::Result<()>
where
    F: FileSource,
    U: UrlFetcher,
{
    loop {
        let prompt = session.labels.user_prompt();
        let text = match read_message(input, &prompt)? {
            InputEvent::Line(text) => text,
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                session.out.line(&style("Interrupted").red().to_string())?;
                continue;
            }
        };

        match handle_turn(session, &text).await {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                session
                    .out
                    .line(&style(format!("Error: {e:#}")).red().to_string())?;
            }
        }
    }

    session.out.line(&style(GOODBYE).green().to_string())?;
    info!("chat session ended");
    Ok(())
}

/// Read one complete message, prompting for continuation lines as needed.
///
/// End-of-input during continuation submits what was accumulated.
fn read_message(input: &mut dyn LineSource, prompt: &str) -> anyhow::Result<InputEvent> {
    let mut buffer = match input.read_line(prompt)? {
        InputEvent::Line(line) => line,
        other => return Ok(other),
    };

    while !is_complete(buffer.trim_end()) {
        match input.read_line(CONTINUATION_PROMPT)? {
            InputEvent::Line(line) => {
                buffer.push('\n');
                buffer.push_str(&line);
            }
            InputEvent::Eof => break,
            InputEvent::Interrupted => return Ok(InputEvent::Interrupted),
        }
    }

    Ok(InputEvent::Line(buffer))
}

async fn handle_turn<F, U>(session: &mut Session<F, U>, text: &str) -> anyhow::Result<LoopControl>
where
    F: FileSource,
    U: UrlFetcher,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(LoopControl::Continue);
    }

    if let Some(command) = command::parse(text) {
        debug!(command = ?command, "running session command");
        return commands::dispatch(session, command).await;
    }

    let prompt = tokio::select! {
        prompt = session.extractor.enrich(text) => prompt,
        () = session.interrupts.interrupted() => {
            warn!("prompt enrichment interrupted");
            session.out.line(&style("Interrupted").red().to_string())?;
            return Ok(LoopControl::Continue);
        }
    };
    let generated = session
        .coordinator
        .generate(&session.backend, &prompt, session.interrupts.interrupted())
        .await;

    let response = match generated {
        Ok(response) => response,
        Err(GenerationError::Interrupted) => {
            session.out.line(&style("Interrupted").red().to_string())?;
            return Ok(LoopControl::Continue);
        }
    };

    session
        .renderer
        .display(
            session.labels.assistant(),
            &response,
            &session.variables,
            session.interrupts.interrupted(),
        )
        .await?;
    Ok(LoopControl::Continue)
}
