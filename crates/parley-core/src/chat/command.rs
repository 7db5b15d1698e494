//! Session command parsing.
//!
//! Commands start with `:` and must match the grammar
//! `:<word>( <name>(\s*=\s*.+)?)?`. Text that starts with `:` but fails the
//! grammar parses to [`Command::Malformed`], which the dispatcher logs and
//! otherwise ignores. The bare word `exit` ends the session.

use std::sync::LazyLock;

use regex::Regex;

static COMMAND_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:[A-Za-z]+( [A-Za-z0-9_]+(\s*=\s*.+)?)?$").expect("command grammar is valid")
});

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// End the session (`exit`).
    Exit,
    /// Print the command list (`:help`).
    Help,
    /// Clear the screen and reprint the banner (`:clear`).
    Clear,
    /// Upsert a session variable (`:var name=value`). Holds the raw argument.
    SetVariable(String),
    /// Print all session variables (`:vars`).
    ListVariables,
    /// Replace the generation backend and clear the screen (`:new`).
    NewSession,
    /// Grammatical command with no handler. Holds the lower-cased word.
    Unknown(String),
    /// Colon-prefixed text that fails the command grammar.
    Malformed(String),
}

/// Returns `true` when `input` matches the command grammar.
pub fn matches_grammar(input: &str) -> bool {
    COMMAND_GRAMMAR.is_match(input)
}

/// Parse user input as a session command.
///
/// Returns `None` if the input is neither `exit` nor colon-prefixed, i.e.
/// it should be sent to the model.
pub fn parse(input: &str) -> Option<Command> {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case("exit") {
        return Some(Command::Exit);
    }
    if !trimmed.starts_with(':') {
        return None;
    }
    if !matches_grammar(trimmed) {
        return Some(Command::Malformed(trimmed.to_string()));
    }

    let body = trimmed[1..].trim();
    let (word, arg) = match body.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (body, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" => Command::Help,
        "clear" => Command::Clear,
        "vars" => Command::ListVariables,
        "new" => Command::NewSession,
        "var" => Command::SetVariable(arg.to_string()),
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}
