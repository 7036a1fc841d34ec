use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use keymap_core::KeyCombo;
use ratatui::prelude::*;
use std::io;

use super::app::{App, Focus};
use super::ui;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            handle_key(app, key);
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process key press events (Windows reports Press + Release)
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.focus {
        Focus::Capture => {
            if key.code == KeyCode::Esc && key.modifiers.is_empty() {
                app.enter_select();
                return;
            }
            let combo = KeyCombo::from(key);
            if !combo.is_modifier_only() {
                app.capture(combo);
            }
        }
        Focus::Select => match key.code {
            KeyCode::Tab | KeyCode::BackTab => app.toggle_selector(),
            KeyCode::Up | KeyCode::Left => app.cycle_keymap(-1),
            KeyCode::Down | KeyCode::Right => app.cycle_keymap(1),
            KeyCode::Char('s') => app.swap(),
            KeyCode::Enter | KeyCode::Char('c') => app.enter_capture(),
            KeyCode::Esc | KeyCode::Char('q') => app.quit(),
            _ => {}
        },
    }
}
