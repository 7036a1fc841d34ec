//! Interactive terminal front end.

mod app;
mod input;
mod terminal;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode, supports_keyboard_enhancement},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use terminal::TerminalGuard;

/// Run the UI until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal_guard = TerminalGuard::new();
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Without these flags many terminals cannot report combos such as
    // Ctrl+Shift+S or Ctrl+Enter.
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
        terminal_guard.keyboard_enhanced();
    }
    info!(enhanced, "terminal ready");

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    input::run_app(&mut terminal, app)?;
    terminal.show_cursor()?;
    Ok(())
}
