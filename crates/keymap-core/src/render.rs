//! Display text for key combinations and shortcuts.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::keys::{KeyCombo, Shortcut};

/// Platform convention used to render shortcut text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// `Ctrl+Alt+Shift+S`, chords as `Ctrl+K, Ctrl+C`.
    #[default]
    Standard,
    /// `⌃⌥⇧⌘S`, chords as `⌘K, ⌘C`.
    Mac,
    /// `C-M-S-s`, chords as `C-x C-s`.
    Emacs,
}

impl RenderStyle {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            RenderStyle::Mac
        } else {
            RenderStyle::Standard
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderStyle::Standard => "standard",
            RenderStyle::Mac => "mac",
            RenderStyle::Emacs => "emacs",
        }
    }
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(RenderStyle::Standard),
            "mac" | "macos" => Ok(RenderStyle::Mac),
            "emacs" => Ok(RenderStyle::Emacs),
            other => Err(format!("unknown render style '{other}'")),
        }
    }
}

/// Renders [`KeyCombo`]s and [`Shortcut`]s as display text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShortcutRenderer {
    style: RenderStyle,
}

impl ShortcutRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn combination_text(&self, combo: &KeyCombo) -> String {
        match self.style {
            RenderStyle::Standard => standard_text(combo),
            RenderStyle::Mac => mac_text(combo),
            RenderStyle::Emacs => emacs_text(combo),
        }
    }

    pub fn shortcut_text(&self, shortcut: &Shortcut) -> String {
        let first = self.combination_text(&shortcut.first);
        match shortcut.second.as_ref() {
            None => first,
            Some(second) => {
                let separator = match self.style {
                    RenderStyle::Emacs => " ",
                    RenderStyle::Standard | RenderStyle::Mac => ", ",
                };
                format!("{first}{separator}{}", self.combination_text(second))
            }
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&standard_text(self))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ShortcutRenderer::default().shortcut_text(self))
    }
}

fn standard_text(combo: &KeyCombo) -> String {
    let mut parts: Vec<String> = Vec::new();
    if combo.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if combo.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if combo.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    if combo.modifiers.contains(KeyModifiers::SUPER) {
        parts.push("Meta".to_string());
    }
    let key = match combo.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        other => named_key(other),
    };
    parts.push(key);
    parts.join("+")
}

fn mac_text(combo: &KeyCombo) -> String {
    let mut text = String::new();
    if combo.modifiers.contains(KeyModifiers::CONTROL) {
        text.push('⌃');
    }
    if combo.modifiers.contains(KeyModifiers::ALT) {
        text.push('⌥');
    }
    if combo.modifiers.contains(KeyModifiers::SHIFT) {
        text.push('⇧');
    }
    if combo.modifiers.contains(KeyModifiers::SUPER) {
        text.push('⌘');
    }
    let key = match combo.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Enter => "↩".to_string(),
        KeyCode::Esc => "⎋".to_string(),
        KeyCode::Tab => "⇥".to_string(),
        KeyCode::Backspace => "⌫".to_string(),
        KeyCode::Delete => "⌦".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Home => "↖".to_string(),
        KeyCode::End => "↘".to_string(),
        KeyCode::PageUp => "⇞".to_string(),
        KeyCode::PageDown => "⇟".to_string(),
        other => named_key(other),
    };
    text.push_str(&key);
    text
}

fn emacs_text(combo: &KeyCombo) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if combo.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("C");
    }
    if combo.modifiers.contains(KeyModifiers::ALT) {
        parts.push("M");
    }
    if combo.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("S");
    }
    if combo.modifiers.contains(KeyModifiers::SUPER) {
        parts.push("s");
    }
    let key = match combo.code {
        KeyCode::Char(' ') => "SPC".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "RET".to_string(),
        KeyCode::Esc => "ESC".to_string(),
        KeyCode::Tab => "TAB".to_string(),
        KeyCode::Backspace => "<backspace>".to_string(),
        KeyCode::Delete => "<delete>".to_string(),
        KeyCode::F(n) => format!("<f{n}>"),
        other => format!("<{}>", named_key(other).to_ascii_lowercase()),
    };
    if parts.is_empty() {
        key
    } else {
        format!("{}-{}", parts.join("-"), key)
    }
}

fn named_key(code: KeyCode) -> String {
    match code {
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::CapsLock => "CapsLock".to_string(),
        KeyCode::ScrollLock => "ScrollLock".to_string(),
        KeyCode::NumLock => "NumLock".to_string(),
        KeyCode::PrintScreen => "PrintScreen".to_string(),
        KeyCode::Pause => "Pause".to_string(),
        KeyCode::Menu => "Menu".to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut(input: &str) -> Shortcut {
        input.parse().expect("shortcut")
    }

    #[test]
    fn standard_style_orders_modifiers() {
        let renderer = ShortcutRenderer::new(RenderStyle::Standard);
        assert_eq!(renderer.shortcut_text(&shortcut("shift+alt+ctrl+s")), "Ctrl+Alt+Shift+S");
        assert_eq!(renderer.shortcut_text(&shortcut("Ctrl+K, Ctrl+C")), "Ctrl+K, Ctrl+C");
        assert_eq!(renderer.shortcut_text(&shortcut("Ctrl+Space")), "Ctrl+Space");
        assert_eq!(renderer.shortcut_text(&shortcut("Shift+F6")), "Shift+F6");
        assert_eq!(renderer.shortcut_text(&shortcut("Ctrl+Page Down")), "Ctrl+PageDown");
        assert_eq!(renderer.shortcut_text(&shortcut("Shift+Escape")), "Shift+Esc");
    }

    #[test]
    fn mac_style_uses_glyphs() {
        let renderer = ShortcutRenderer::new(RenderStyle::Mac);
        assert_eq!(renderer.shortcut_text(&shortcut("Meta+Shift+F")), "⇧⌘F");
        assert_eq!(renderer.shortcut_text(&shortcut("Alt+Enter")), "⌥↩");
    }

    #[test]
    fn emacs_style_round_trips_dash_notation() {
        let renderer = ShortcutRenderer::new(RenderStyle::Emacs);
        assert_eq!(renderer.shortcut_text(&shortcut("C-x, C-s")), "C-x C-s");
        assert_eq!(renderer.shortcut_text(&shortcut("M-w")), "M-w");
        assert_eq!(renderer.shortcut_text(&shortcut("Ctrl+Alt+Left")), "C-M-<left>");
    }

    #[test]
    fn display_uses_standard_style() {
        assert_eq!(shortcut("C-M-s").to_string(), "Ctrl+Alt+S");
    }

    #[test]
    fn style_parses_from_config_names() {
        assert_eq!("Mac".parse::<RenderStyle>(), Ok(RenderStyle::Mac));
        assert_eq!("emacs".parse::<RenderStyle>(), Ok(RenderStyle::Emacs));
        assert!("vim".parse::<RenderStyle>().is_err());
    }
}
