//! Terminal-backed document: the window title and the visible screen

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, SetTitle};
use crossterm::tty::IsTty;
use std::io::stdout;
use studentdesk_core::router::Document;
use tracing::debug;

/// Document that mirrors its title into the terminal window title
pub struct TerminalDocument {
    title: String,
    /// Clear the screen on each navigation (interactive mode only)
    clear_on_navigate: bool,
    is_tty: bool,
}

impl TerminalDocument {
    pub fn new(clear_on_navigate: bool) -> Self {
        Self {
            title: String::new(),
            clear_on_navigate,
            is_tty: stdout().is_tty(),
        }
    }
}

impl Document for TerminalDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        if self.is_tty {
            if let Err(e) = execute!(stdout(), SetTitle(&title)) {
                debug!("Failed to set terminal title: {}", e);
            }
        }
        self.title = title;
    }

    fn scroll_to_top(&mut self) {
        if !(self.is_tty && self.clear_on_navigate) {
            return;
        }
        if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            debug!("Failed to reset terminal viewport: {}", e);
        }
    }
}
