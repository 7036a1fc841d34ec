//! Key combinations and shortcuts.
//!
//! A [`KeyCombo`] is one normalized key press. A [`Shortcut`] is what a keymap
//! binds: a first keystroke and, for chords, a second one.
//!
//! Two notations are accepted when parsing:
//! - `+` notation: `Ctrl+Alt+S`, `Shift+F6`, `Meta+Enter` (letters are case-insensitive)
//! - Emacs dash notation: `C-x`, `M-w`, `C-M-s`, `C--` (an uppercase letter implies Shift)

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::KeymapError;

const TRACKED_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT)
    .union(KeyModifiers::SUPER);

const MAX_FUNCTION_KEY: u8 = 24;

/// A single key press: key code plus modifier mask.
///
/// Construction always goes through [`KeyCombo::new`], so two combos compare
/// equal iff they describe the same physical press: letters are lowercase with
/// Shift made explicit, and `BackTab` is `Shift+Tab`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let mut modifiers = modifiers & TRACKED_MODIFIERS;
        let code = match code {
            KeyCode::BackTab => {
                modifiers.insert(KeyModifiers::SHIFT);
                KeyCode::Tab
            }
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                modifiers.insert(KeyModifiers::SHIFT);
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Whether this press is a lone modifier key (Shift, Ctrl...), which is
    /// never a shortcut on its own.
    pub fn is_modifier_only(&self) -> bool {
        matches!(self.code, KeyCode::Modifier(_))
    }
}

impl From<KeyEvent> for KeyCombo {
    fn from(event: KeyEvent) -> Self {
        KeyCombo::new(event.code, event.modifiers)
    }
}

impl FromStr for KeyCombo {
    type Err = KeymapError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_key_combo(input).map_err(|reason| invalid_key(input, reason))
    }
}

/// What a keymap binds to an action: one keystroke, or a two-keystroke chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub first: KeyCombo,
    pub second: Option<KeyCombo>,
}

impl Shortcut {
    pub fn single(first: KeyCombo) -> Self {
        Self {
            first,
            second: None,
        }
    }

    pub fn chord(first: KeyCombo, second: KeyCombo) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    /// A shortcut is triggered by `combo` when its first keystroke is `combo`.
    pub fn starts_with(&self, combo: &KeyCombo) -> bool {
        self.first == *combo
    }
}

impl From<KeyCombo> for Shortcut {
    fn from(combo: KeyCombo) -> Self {
        Shortcut::single(combo)
    }
}

impl FromStr for Shortcut {
    type Err = KeymapError;

    /// Parse `"Ctrl+S"` or a chord such as `"Ctrl+K, Ctrl+C"` / `"C-x C-s"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let Some((first, rest)) = split_chord(trimmed) else {
            return Ok(Shortcut::single(trimmed.parse()?));
        };
        if split_chord(rest).is_some() {
            return Err(invalid_key(input, "at most two keystrokes are supported".to_string()));
        }
        let first = parse_key_combo(first).map_err(|reason| invalid_key(input, reason))?;
        let second = parse_key_combo(rest).map_err(|reason| invalid_key(input, reason))?;
        Ok(Shortcut::chord(first, second))
    }
}

fn invalid_key(input: &str, reason: String) -> KeymapError {
    KeymapError::InvalidKey {
        input: input.to_string(),
        reason,
    }
}

/// The two keystrokes of a chord. They are separated by a comma, or by
/// whitespace in dash notation (`C-x C-s`).
fn split_chord(input: &str) -> Option<(&str, &str)> {
    if let Some(idx) = chord_split(input) {
        return Some((input[..idx].trim(), input[idx + 1..].trim()));
    }
    if input.contains('+') {
        return None;
    }
    let (first, rest) = input.split_once(char::is_whitespace)?;
    first.contains('-').then(|| (first, rest.trim()))
}

/// Byte offset of the comma separating two keystrokes, if any.
///
/// A comma directly after a modifier separator is the comma key itself
/// (`Ctrl+,`), as is a leading comma.
fn chord_split(input: &str) -> Option<usize> {
    input.char_indices().find_map(|(idx, ch)| {
        if ch != ',' || idx == 0 {
            return None;
        }
        let before = input[..idx].trim_end();
        if before.is_empty() || before.ends_with(|c| c == '+' || c == '-') {
            None
        } else {
            Some(idx)
        }
    })
}

fn parse_key_combo(input: &str) -> Result<KeyCombo, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCombo::plain(KeyCode::Char(ch)));
    }

    if trimmed.contains('+') {
        let (modifiers, code) = split_modifiers(trimmed, '+', plus_modifier)?;
        // Letters are case-insensitive here: "Ctrl+S" is Ctrl and the S key.
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Ok(KeyCombo::new(code, modifiers))
    } else if trimmed.contains('-') {
        let (modifiers, code) = split_modifiers(trimmed, '-', dash_modifier)?;
        Ok(KeyCombo::new(code, modifiers))
    } else {
        Ok(KeyCombo::plain(parse_key_code(trimmed)?))
    }
}

fn split_modifiers(
    input: &str,
    separator: char,
    lookup: fn(&str) -> Option<KeyModifiers>,
) -> Result<(KeyModifiers, KeyCode), String> {
    let (mod_str, key_part) = if let Some(mod_str) = input.strip_suffix(separator) {
        let mod_str = mod_str.trim_end().trim_end_matches(separator);
        if mod_str.trim().is_empty() {
            return Err(format!("missing modifier before '{separator}'"));
        }
        (mod_str, &input[input.len() - separator.len_utf8()..])
    } else {
        let mut split = input.rsplitn(2, separator);
        let key_part = split.next().ok_or_else(|| "empty key".to_string())?;
        let mod_str = split.next().unwrap_or_default();
        (mod_str, key_part)
    };

    let modifiers = parse_modifiers(mod_str, separator, lookup)?;
    let code = parse_key_code(key_part)?;
    Ok((modifiers, code))
}

fn parse_modifiers(
    input: &str,
    separator: char,
    lookup: fn(&str) -> Option<KeyModifiers>,
) -> Result<KeyModifiers, String> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split(separator) {
        let raw = part.trim();
        if raw.is_empty() {
            return Err("empty modifier segment".to_string());
        }
        let flag = lookup(raw).ok_or_else(|| format!("unknown modifier '{raw}'"))?;
        if modifiers.contains(flag) {
            return Err(format!("duplicate modifier '{raw}'"));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn plus_modifier(name: &str) -> Option<KeyModifiers> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "alt" | "option" | "opt" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        "meta" | "cmd" | "command" | "super" | "win" => Some(KeyModifiers::SUPER),
        _ => None,
    }
}

fn dash_modifier(name: &str) -> Option<KeyModifiers> {
    match name {
        "C" | "c" => Some(KeyModifiers::CONTROL),
        "M" | "m" => Some(KeyModifiers::ALT),
        "S" => Some(KeyModifiers::SHIFT),
        "s" => Some(KeyModifiers::SUPER),
        _ => match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(KeyModifiers::CONTROL),
            "alt" | "meta" => Some(KeyModifiers::ALT),
            "shift" => Some(KeyModifiers::SHIFT),
            "super" | "cmd" => Some(KeyModifiers::SUPER),
            _ => None,
        },
    }
}

fn parse_key_code(input: &str) -> Result<KeyCode, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    // Emacs writes named keys in angle brackets: <f5>, <delete>.
    let trimmed = trimmed
        .strip_prefix('<')
        .and_then(|name| name.strip_suffix('>'))
        .filter(|name| !name.is_empty())
        .unwrap_or(trimmed);
    let norm = trimmed.to_ascii_lowercase().replace(' ', "");
    if let Some(number) = norm.strip_prefix('f')
        && let Ok(n) = number.parse::<u8>()
    {
        return if (1..=MAX_FUNCTION_KEY).contains(&n) {
            Ok(KeyCode::F(n))
        } else {
            Err(format!("function key out of range '{trimmed}'"))
        };
    }
    match norm.as_str() {
        "enter" | "return" | "ret" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "insert" | "ins" => Ok(KeyCode::Insert),
        "tab" => Ok(KeyCode::Tab),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "greater" => Ok(KeyCode::Char('>')),
        "less" => Ok(KeyCode::Char('<')),
        "comma" => Ok(KeyCode::Char(',')),
        "period" | "dot" => Ok(KeyCode::Char('.')),
        "slash" => Ok(KeyCode::Char('/')),
        "backslash" => Ok(KeyCode::Char('\\')),
        "semicolon" => Ok(KeyCode::Char(';')),
        "quote" | "apostrophe" => Ok(KeyCode::Char('\'')),
        "doublequote" => Ok(KeyCode::Char('"')),
        "backtick" | "backquote" | "grave" => Ok(KeyCode::Char('`')),
        "lbracket" | "leftbracket" | "openbracket" => Ok(KeyCode::Char('[')),
        "rbracket" | "rightbracket" | "closebracket" => Ok(KeyCode::Char(']')),
        "equal" | "equals" => Ok(KeyCode::Char('=')),
        _ => Err(format!("unknown key '{trimmed}'")),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(input: &str) -> KeyCombo {
        input.parse().expect("combo")
    }

    #[test]
    fn plus_and_dash_notations_agree() {
        let expected = KeyCombo::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(combo("Ctrl+Alt+S"), expected);
        assert_eq!(combo("ctrl+alt+s"), expected);
        assert_eq!(combo("C-M-s"), expected);
    }

    #[test]
    fn bare_uppercase_letter_implies_shift() {
        let parsed = combo("S");
        assert_eq!(parsed.code, KeyCode::Char('s'));
        assert_eq!(parsed.modifiers, KeyModifiers::SHIFT);
    }

    #[test]
    fn event_normalization_matches_parsing() {
        let event = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(KeyCombo::from(event), combo("Ctrl+Shift+S"));

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyCombo::from(back_tab), combo("Shift+Tab"));
    }

    #[test]
    fn untracked_modifiers_are_dropped() {
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::HYPER | KeyModifiers::CONTROL);
        assert_eq!(KeyCombo::from(event), combo("Ctrl+F5"));
    }

    #[test]
    fn separator_keys_parse() {
        assert_eq!(combo("C--"), KeyCombo::new(KeyCode::Char('-'), KeyModifiers::CONTROL));
        assert_eq!(combo("Ctrl++"), KeyCombo::new(KeyCode::Char('+'), KeyModifiers::CONTROL));
        assert_eq!(combo("-"), KeyCombo::plain(KeyCode::Char('-')));
    }

    #[test]
    fn named_and_function_keys() {
        assert_eq!(combo("Shift+F6"), KeyCombo::new(KeyCode::F(6), KeyModifiers::SHIFT));
        assert_eq!(combo("F13"), KeyCombo::plain(KeyCode::F(13)));
        assert_eq!(combo("Alt+Enter"), KeyCombo::new(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(combo("Meta+PageDown"), KeyCombo::new(KeyCode::PageDown, KeyModifiers::SUPER));
        assert_eq!(combo("C-/"), KeyCombo::new(KeyCode::Char('/'), KeyModifiers::CONTROL));
        assert_eq!(combo("C-<delete>"), KeyCombo::new(KeyCode::Delete, KeyModifiers::CONTROL));
        assert_eq!(combo("<f5>"), KeyCombo::plain(KeyCode::F(5)));
    }

    #[test]
    fn rejects_bad_input() {
        let err = "Ctrl+NotAKey".parse::<KeyCombo>().unwrap_err().to_string();
        assert!(err.contains("unknown key"));

        let err = "Ctrl+Ctrl+S".parse::<KeyCombo>().unwrap_err().to_string();
        assert!(err.contains("duplicate modifier"));

        let err = "Hyper+S".parse::<KeyCombo>().unwrap_err().to_string();
        assert!(err.contains("unknown modifier"));

        let err = "--".parse::<KeyCombo>().unwrap_err().to_string();
        assert!(err.contains("missing modifier"));

        let err = "F25".parse::<KeyCombo>().unwrap_err().to_string();
        assert!(err.contains("out of range"));

        assert!("".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn chords_parse() {
        let shortcut: Shortcut = "Ctrl+K, Ctrl+C".parse().expect("chord");
        assert_eq!(shortcut.first, combo("Ctrl+K"));
        assert_eq!(shortcut.second, Some(combo("Ctrl+C")));
        assert!(shortcut.starts_with(&combo("ctrl+k")));

        let emacs: Shortcut = "C-x,C-s".parse().expect("emacs chord");
        assert_eq!(emacs.second, Some(combo("C-s")));

        let spaced: Shortcut = "C-x C-s".parse().expect("spaced chord");
        assert_eq!(spaced, emacs);

        let single: Shortcut = "Ctrl+Page Down".parse().expect("spaced key name");
        assert_eq!(single.second, None);
    }

    #[test]
    fn comma_key_is_not_a_chord() {
        let shortcut: Shortcut = "Ctrl+,".parse().expect("comma key");
        assert_eq!(shortcut, Shortcut::single(KeyCombo::new(KeyCode::Char(','), KeyModifiers::CONTROL)));

        let shortcut: Shortcut = ",".parse().expect("bare comma");
        assert_eq!(shortcut.second, None);
    }

    #[test]
    fn three_stroke_chords_are_rejected() {
        let err = "C-x, C-s, C-c".parse::<Shortcut>().unwrap_err().to_string();
        assert!(err.contains("at most two"));
    }
}
