//! Terminal screen clearing.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Clears the visible terminal.
pub trait ScreenClearer: Send + Sync {
    /// Returns an error when the terminal cannot be cleared; the caller
    /// falls back to scrolling the old content away.
    fn clear(&self) -> io::Result<()>;
}

/// Clears stdout with crossterm escape sequences.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScreen;

impl ScreenClearer for TerminalScreen {
    fn clear(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(io::Error::other("stdout is not a terminal"));
        }
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        stdout.flush()
    }
}
