//! Session command handling.
//!
//! Parsing lives in `parley_core::chat::command`; this module runs a parsed
//! [`Command`] against the session and prints its result.

use std::io;

use console::style;
use tracing::{error, info, warn};

use parley_core::chat::command::Command;
use parley_core::chat::variables::Variables;
use parley_core::output::OutputSink;

use super::session::Session;

/// Commands shown by `:help`, in display order.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("exit", "Exit the chat session"),
    (":help", "Display this help message"),
    (":var", "Set a variable (:var name=value)"),
    (":vars", "List defined variables in the current session"),
    (":clear", "Clear the screen"),
    (":new", "Start a new AI session"),
];

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Run `command` against `session`.
///
/// Errors are returned only for output failures and for a `:new` whose
/// backend could not be built (the current backend stays in place).
pub async fn dispatch<F, U>(
    session: &mut Session<F, U>,
    command: Command,
) -> anyhow::Result<LoopControl> {
    match command {
        Command::Exit => return Ok(LoopControl::Exit),
        Command::Help => print_help(&session.out)?,
        Command::Clear => session.clear_screen()?,
        Command::ListVariables => print_variables(&session.out, &session.variables)?,
        Command::SetVariable(argument) => match session.variables.set_from_argument(&argument) {
            Ok((name, value)) => {
                session.out.line(
                    &style(format!("Set variable {name} {value}"))
                        .green()
                        .bright()
                        .to_string(),
                )?;
            }
            Err(e) => error!(argument = %argument, error = %e, "invalid variable syntax"),
        },
        Command::NewSession => {
            let backend = session.factory.create().await?;
            info!(
                provider = backend.provider_name(),
                model = backend.model(),
                "started new generation session"
            );
            session.backend = backend;
            session.clear_screen()?;
        }
        Command::Unknown(word) => {
            session
                .out
                .line(&style(format!("Unknown command: :{word}")).red().to_string())?;
            print_help(&session.out)?;
        }
        Command::Malformed(raw) => warn!(input = %raw, "invalid command syntax"),
    }
    Ok(LoopControl::Continue)
}

/// Print the command list with padded, aligned names.
pub fn print_help(out: &OutputSink) -> io::Result<()> {
    let width = HELP_ENTRIES
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        + 2;

    out.line(&style("\nAvailable Commands:").bold().to_string())?;
    for (name, description) in HELP_ENTRIES {
        out.line(&format!(
            "  {}{}",
            style(format!("{name:<width$}")).yellow(),
            description
        ))?;
    }
    out.line(
        &style("\nAny other input will be sent to the AI assistant.")
            .italic()
            .to_string(),
    )
}

/// Print every session variable, or guidance on defining one.
pub fn print_variables(out: &OutputSink, variables: &Variables) -> io::Result<()> {
    out.line(&style("\nDefined Variables:").bold().to_string())?;

    if variables.is_empty() {
        out.line(
            &style("No variables are currently defined.")
                .italic()
                .to_string(),
        )?;
        out.line("")?;
        out.line("You can define variables with:")?;
        out.line(&format!("  {}", style(":var name=value").yellow()))?;
        out.line("")?;
        return out.line("Once defined, variables can be referenced in subsequent messages.");
    }

    for (name, value) in variables.iter() {
        out.line(&format!("  {} = {value}", style(name).yellow()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(captured: &parley_core::output::CapturedOutput) -> String {
        console::strip_ansi_codes(&captured.contents()).into_owned()
    }

    #[test]
    fn test_help_lists_every_command_aligned() {
        let (out, captured) = OutputSink::capture();
        print_help(&out).unwrap();
        let text = plain(&captured);

        assert!(text.contains("Available Commands:"));
        for (name, description) in HELP_ENTRIES {
            assert!(text.contains(&format!("{name:<8}{description}")), "{name} missing");
        }
        assert!(text.ends_with("Any other input will be sent to the AI assistant.\n"));
    }

    #[test]
    fn test_empty_variables_show_guidance() {
        let (out, captured) = OutputSink::capture();
        print_variables(&out, &Variables::new()).unwrap();
        let text = plain(&captured);

        assert!(text.contains("No variables are currently defined."));
        assert!(text.contains(":var name=value"));
    }

    #[test]
    fn test_variables_listed_in_name_order() {
        let (out, captured) = OutputSink::capture();
        let mut vars = Variables::new();
        vars.set("voice", "true");
        vars.set("text", "false");
        print_variables(&out, &vars).unwrap();
        let text = plain(&captured);

        let text_at = text.find("text = false").unwrap();
        let voice_at = text.find("voice = true").unwrap();
        assert!(text_at < voice_at);
    }
}
