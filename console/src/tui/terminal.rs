//! Terminal setup and RAII restoration.
//!
//! [`Tui`] wraps a ratatui terminal: raw mode and the alternate screen are
//! entered on creation and restored on drop, so the shell comes back intact
//! however the console exits. [`install_panic_hook`] covers the panic path,
//! restoring the terminal before the panic message prints.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Installs a panic hook that restores the terminal before the panic
/// message is displayed.
///
/// Call once at startup, before creating a [`Tui`]. Restoration errors are
/// ignored; the terminal may already be in an inconsistent state when a
/// panic fires.
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), Show);
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        previous_hook(panic_info);
    }));
}

/// A ratatui terminal with RAII cleanup.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    /// Initializes the terminal: raw mode, alternate screen, hidden cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if any initialization step fails; partial setup is
    /// rolled back before returning.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws one frame using the provided closure.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Explicitly restores the terminal to its original state.
    ///
    /// # Errors
    ///
    /// Returns an error if restoration fails. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Errors are ignored during unwinding.
        let _ = self.restore();
    }
}
