//! Terminal session management.
//!
//! [`TerminalSession`] puts the terminal into raw mode, switches to the
//! alternate screen and enables mouse capture, and undoes all of it on drop.
//! Mouse capture is what delivers pointer-down events to the tag input, so
//! dropping the session is also what stops them.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// An active terminal session.
pub struct TerminalSession {
    /// The ratatui terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether mouse capture was enabled and must be released.
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Start a session.
    ///
    /// If any step fails, the steps already taken are undone before the
    /// error is returned.
    pub fn start() -> Result<Self> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("enable raw mode: {}", e)))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("enter alternate screen: {}", e)));
        }

        let mouse_enabled = match execute!(stdout, EnableMouseCapture) {
            Ok(()) => true,
            Err(e) => {
                // Keyboard still works without it
                warn!(error = %e, "Mouse capture unavailable");
                false
            }
        };

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore(mouse_enabled);
                return Err(AppError::terminal(format!("create terminal: {}", e)));
            }
        };

        debug!(mouse_enabled, "Terminal session started");
        Ok(Self {
            terminal,
            mouse_enabled,
        })
    }

    /// The ratatui terminal to draw on.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Whether pointer events are being delivered.
    pub fn mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore(self.mouse_enabled);
        debug!("Terminal session restored");
    }
}

/// Best-effort terminal restore. Errors are logged, not returned.
fn restore(mouse_enabled: bool) {
    let mut stdout = io::stdout();
    if mouse_enabled {
        if let Err(e) = execute!(stdout, DisableMouseCapture) {
            warn!(error = %e, "Failed to disable mouse capture");
        }
    }
    if let Err(e) = execute!(stdout, LeaveAlternateScreen) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
}
