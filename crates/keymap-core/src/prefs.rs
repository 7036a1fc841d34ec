//! Persisted source/target keymap selection.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{config_dir, read_limited};
use crate::error::Result;
use crate::keymap::KeymapRegistry;

const PREFS_FILE: &str = "prefs.toml";

/// Source keymap offered when nothing has been saved yet.
pub const DEFAULT_SOURCE_KEYMAP: &str = "Eclipse";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_keymap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_keymap: Option<String>,
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join(PREFS_FILE))
    }

    /// Load preferences from `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = read_limited(path)?;
        let prefs: Preferences = toml::from_str(&text)?;
        debug!(path = %path.display(), "preferences loaded");
        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        info!(path = %path.display(), "preferences saved");
        Ok(())
    }

    /// Registry indices of the source and target keymaps.
    ///
    /// A stored name the registry does not know falls back to the default
    /// (`Eclipse` for the source, the active keymap for the target), then to
    /// the first registered keymap.
    pub fn resolve(&self, registry: &KeymapRegistry) -> (usize, usize) {
        let source = self
            .source_keymap
            .as_deref()
            .and_then(|name| registry.position(name))
            .or_else(|| registry.position(DEFAULT_SOURCE_KEYMAP))
            .unwrap_or(0);
        let target = self
            .target_keymap
            .as_deref()
            .and_then(|name| registry.position(name))
            .unwrap_or_else(|| registry.active_index());
        debug!(source, target, "resolved keymap selection");
        (source, target)
    }

    /// Record the keymaps at `source` and `target` for the next session.
    pub fn remember(&mut self, registry: &KeymapRegistry, source: usize, target: usize) {
        if let Some(view) = registry.at(source) {
            self.source_keymap = Some(view.keymap().name.clone());
        }
        if let Some(view) = registry.at(target) {
            self.target_keymap = Some(view.keymap().name.clone());
        }
    }
}
