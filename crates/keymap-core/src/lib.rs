//! Keymap model and shortcut translation.
//!
//! Given a key press, [`Translator`] finds the actions it triggers in a
//! source keymap and lists every shortcut a target keymap binds to those
//! actions, each with a human-readable description.

pub mod actions;
pub mod config;
pub mod defaults;
pub mod describe;
pub mod error;
pub mod keymap;
pub mod keys;
pub mod prefs;
pub mod render;
pub mod translate;

pub use actions::{Action, ActionCatalog, ActionLookup, MenuGroup, MenuItem};
pub use config::{LoadedKeymaps, load_actions, load_keymaps};
pub use describe::{Description, describe, group_label};
pub use error::{KeymapError, Result};
pub use keymap::{Binding, Keymap, KeymapLookup, KeymapRegistry, KeymapView};
pub use keys::{KeyCombo, Shortcut};
pub use prefs::Preferences;
pub use render::{RenderStyle, ShortcutRenderer};
pub use translate::{Detail, TranslationResult, Translator};
