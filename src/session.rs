//! Everything a translation needs, loaded once at startup.

use anyhow::Result;
use keymap_core::{
    ActionCatalog, Detail, KeyCombo, KeymapRegistry, ShortcutRenderer, TranslationResult,
    Translator, load_actions, load_keymaps,
};

use crate::cli::Cli;

pub struct Session {
    pub registry: KeymapRegistry,
    pub catalog: ActionCatalog,
    pub renderer: ShortcutRenderer,
    pub detail: Detail,
}

impl Session {
    pub fn new(
        registry: KeymapRegistry,
        catalog: ActionCatalog,
        renderer: ShortcutRenderer,
        detail: Detail,
    ) -> Self {
        Self {
            registry,
            catalog,
            renderer,
            detail,
        }
    }

    /// Built-in data merged with the user's config files. Problems in those
    /// files come back as warnings.
    pub fn load(cli: &Cli) -> Result<(Self, Vec<String>)> {
        let user_config = !cli.no_user_config;
        let (mut loaded, mut warnings) = load_keymaps(cli.keymap_file.as_deref(), user_config)?;
        let (catalog, action_warnings) = load_actions(cli.actions_file.as_deref(), user_config)?;
        warnings.extend(action_warnings);
        loaded.registry.resolve_aliases(&catalog);

        let style = cli.style.unwrap_or(loaded.style);
        let detail = if cli.plain { Detail::Plain } else { Detail::Full };
        let session = Self::new(
            loaded.registry,
            catalog,
            ShortcutRenderer::new(style),
            detail,
        );
        Ok((session, warnings))
    }

    pub fn keymap_name(&self, index: usize) -> &str {
        self.registry
            .at(index)
            .map(|view| view.keymap().name.as_str())
            .unwrap_or("")
    }

    /// Translate `combo` from the keymap at `source` to the one at `target`.
    pub fn translate(&self, combo: &KeyCombo, source: usize, target: usize) -> Vec<TranslationResult> {
        let (Some(source), Some(target)) = (self.registry.at(source), self.registry.at(target)) else {
            return Vec::new();
        };
        Translator::new(&self.catalog, self.renderer)
            .with_detail(self.detail)
            .translate(combo, &source, &target)
    }
}

/// Text shown next to a result's shortcut.
pub fn result_label(result: &TranslationResult) -> &str {
    if result.description.is_empty() {
        &result.action_id
    } else {
        &result.description
    }
}
