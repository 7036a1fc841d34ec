//! Terminal state restoration.

use crossterm::{
    event::PopKeyboardEnhancementFlags,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

/// Restores the terminal when dropped, including on panic.
///
/// Create it right after raw mode is enabled and keep it for the whole
/// session.
#[derive(Default)]
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard enhancement flags were pushed and must be popped on exit.
    pub fn keyboard_enhanced(&mut self) {
        self.keyboard_enhanced = true;
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored: drop must not panic.
        let mut stdout = std::io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
