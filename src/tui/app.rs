//! Application state and logic.
//!
//! The [`App`] holds the loaded [`Session`], the selected source and target
//! keymaps and the last captured keystroke with its translations. Input is
//! handled in one of two [`Focus`] states.

use keymap_core::{KeyCombo, TranslationResult};
use tracing::debug;

use crate::session::Session;

/// Where key presses go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Every key press is a shortcut to translate (Esc leaves).
    Capture,
    /// Keys pick the source and target keymaps.
    Select,
}

/// Which keymap selector is highlighted in [`Focus::Select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    Source,
    Target,
}

pub struct App {
    pub session: Session,
    /// Registry index of the keymap shortcuts are pressed in
    pub source: usize,
    /// Registry index of the keymap results are shown for
    pub target: usize,
    pub focus: Focus,
    pub selector: Selector,
    /// Last translated keystroke
    pub captured: Option<KeyCombo>,
    pub results: Vec<TranslationResult>,
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, source: usize, target: usize) -> Self {
        let mut app = Self {
            session,
            source,
            target,
            focus: Focus::Capture,
            selector: Selector::Source,
            captured: None,
            results: Vec::new(),
            status_message: String::new(),
            should_quit: false,
        };
        app.update_status();
        app
    }

    pub fn source_name(&self) -> &str {
        self.session.keymap_name(self.source)
    }

    pub fn target_name(&self) -> &str {
        self.session.keymap_name(self.target)
    }

    /// The captured keystroke as display text.
    pub fn captured_text(&self) -> Option<String> {
        self.captured
            .as_ref()
            .map(|combo| self.session.renderer.combination_text(combo))
    }

    pub fn capture(&mut self, combo: KeyCombo) {
        self.captured = Some(combo);
        self.refresh();
    }

    /// Recompute the results for the captured keystroke.
    pub fn refresh(&mut self) {
        self.results = match self.captured.as_ref() {
            Some(combo) => self.session.translate(combo, self.source, self.target),
            None => Vec::new(),
        };
        if let Some(text) = self.captured_text() {
            debug!(
                combo = %text,
                source = self.source_name(),
                target = self.target_name(),
                results = self.results.len(),
                "refreshed translation"
            );
        }
        self.update_status();
    }

    pub fn enter_select(&mut self) {
        self.focus = Focus::Select;
        self.update_status();
    }

    pub fn enter_capture(&mut self) {
        self.focus = Focus::Capture;
        self.update_status();
    }

    pub fn toggle_selector(&mut self) {
        self.selector = match self.selector {
            Selector::Source => Selector::Target,
            Selector::Target => Selector::Source,
        };
    }

    /// Move the highlighted selector `delta` keymaps forward, wrapping around.
    pub fn cycle_keymap(&mut self, delta: isize) {
        if self.session.registry.is_empty() {
            return;
        }
        let len = self.session.registry.len();
        let slot = match self.selector {
            Selector::Source => &mut self.source,
            Selector::Target => &mut self.target,
        };
        *slot = (*slot as isize + delta).rem_euclid(len as isize) as usize;
        self.refresh();
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        self.refresh();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn update_status(&mut self) {
        self.status_message = match self.focus {
            Focus::Capture => "Press a shortcut to translate | Esc: choose keymaps".to_string(),
            Focus::Select => {
                "Tab: switch | ↑↓←→: change keymap | s: swap | Enter: capture | q: quit".to_string()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::builtin_session;

    fn app(source: &str, target: &str) -> App {
        let session = builtin_session();
        let source = session.registry.position(source).expect("source");
        let target = session.registry.position(target).expect("target");
        App::new(session, source, target)
    }

    fn combo(input: &str) -> KeyCombo {
        input.parse().expect("combo")
    }

    #[test]
    fn starts_capturing_without_results() {
        let app = app("Eclipse", "$default");
        assert_eq!(app.focus, Focus::Capture);
        assert!(app.captured_text().is_none());
        assert!(app.results.is_empty());
        assert_eq!(app.source_name(), "Eclipse");
        assert_eq!(app.target_name(), "$default");
    }

    #[test]
    fn capture_translates() {
        let mut app = app("Eclipse", "$default");
        app.capture(combo("Ctrl+D"));
        assert_eq!(app.captured_text().as_deref(), Some("Ctrl+D"));
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].shortcut_text, "Ctrl+Y");
    }

    #[test]
    fn unbound_capture_clears_results() {
        let mut app = app("Eclipse", "$default");
        app.capture(combo("Ctrl+D"));
        app.capture(combo("F13"));
        assert!(app.results.is_empty());
        assert_eq!(app.captured_text().as_deref(), Some("F13"));
    }

    #[test]
    fn changing_target_recomputes() {
        let mut app = app("$default", "$default");
        app.capture(combo("Ctrl+N"));
        assert_eq!(app.results[0].shortcut_text, "Ctrl+N");

        app.enter_select();
        app.toggle_selector();
        app.cycle_keymap(1);
        assert_eq!(app.target_name(), "Eclipse");
        assert_eq!(app.results[0].shortcut_text, "Ctrl+Shift+T");
    }

    #[test]
    fn cycling_wraps_around() {
        let mut app = app("$default", "$default");
        app.cycle_keymap(-1);
        assert_eq!(app.source_name(), "Emacs");
        app.cycle_keymap(1);
        assert_eq!(app.source_name(), "$default");
    }

    #[test]
    fn swap_exchanges_keymaps() {
        let mut app = app("Eclipse", "$default");
        app.capture(combo("Ctrl+Y"));
        app.swap();
        assert_eq!(app.source_name(), "$default");
        assert_eq!(app.target_name(), "Eclipse");
        // $default Ctrl+Y is Delete Line, which Eclipse binds to Ctrl+D.
        assert_eq!(app.results[0].shortcut_text, "Ctrl+D");
    }

    #[test]
    fn status_follows_focus() {
        let mut app = app("Eclipse", "$default");
        assert!(app.status_message.contains("Esc"));
        app.enter_select();
        assert!(app.status_message.contains("swap"));
        app.enter_capture();
        assert_eq!(app.focus, Focus::Capture);
    }
}
