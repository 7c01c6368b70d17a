//! Terminal setup and teardown utilities.
//!
//! The order page runs on the alternate screen in raw mode. Every failure
//! here is reported as [`StorefrontError::Io`] with the step that failed.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::Result;
use crate::error::StorefrontError;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Wraps an I/O error with the step that failed.
fn io_error(step: &str, e: io::Error) -> StorefrontError {
    StorefrontError::Io(format!("failed to {step}: {e}"))
}

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails or if stdout is not a TTY.
pub fn setup_terminal() -> Result<Tui> {
    // The page needs key events and a screen to draw on.
    if !io::stdout().is_terminal() {
        return Err(StorefrontError::Io(
            "the order page requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| io_error("enable raw mode", e))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        // Try to restore terminal state before returning error
        let _ = disable_raw_mode();
        io_error("enter alternate screen", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| {
        // Try to restore terminal state before returning error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        io_error("create terminal", e)
    })?;

    Ok(terminal)
}

/// Sets the terminal window title.
///
/// Mirrors the page title: `Order {id}`, the fetch error, or `Sign In`.
///
/// # Errors
///
/// Returns an error if the escape sequence cannot be written.
pub fn set_title(terminal: &mut Tui, title: &str) -> Result<()> {
    execute!(terminal.backend_mut(), SetTitle(title)).map_err(|e| io_error("set title", e))
}

/// Restores the terminal to its original state.
///
/// Disables raw mode, returns to the main screen buffer and shows the
/// cursor the login page may have moved.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| io_error("disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| io_error("leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| io_error("show cursor", e))?;
    Ok(())
}
