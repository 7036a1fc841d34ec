//! Error types for keymap-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading keymaps, actions and preferences.
///
/// Lookups never fail: an unknown keymap or action is reported as `None` or an
/// empty result. These errors only come from construction and file handling.
#[derive(Error, Debug)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid key '{input}': {reason}")]
    InvalidKey { input: String, reason: String },

    #[error("Duplicate keymap '{0}'")]
    DuplicateKeymap(String),

    #[error("Keymap '{keymap}' has unknown parent '{parent}'")]
    UnknownParent { keymap: String, parent: String },

    #[error("Keymap '{0}' inherits from itself")]
    ParentCycle(String),

    #[error("Active keymap '{0}' is not registered")]
    UnknownActiveKeymap(String),

    #[error("Duplicate action id or alias '{0}'")]
    DuplicateAction(String),

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, KeymapError>;
