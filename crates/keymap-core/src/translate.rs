//! Shortcut translation between keymaps.

use std::collections::HashSet;

use tracing::debug;

use crate::actions::{ActionLookup, canonical_id};
use crate::describe::describe;
use crate::keymap::KeymapLookup;
use crate::keys::KeyCombo;
use crate::render::ShortcutRenderer;

/// One translated shortcut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    pub shortcut_text: String,
    pub action_id: String,
    pub display_name: Option<String>,
    pub group_label: Option<String>,
    pub icon: Option<String>,
    /// Full display line, empty in [`Detail::Plain`] or when the action is unknown.
    pub description: String,
}

/// How much is known about each result beyond the shortcut text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Detail {
    /// Shortcut text plus description, group and icon.
    #[default]
    Full,
    /// Shortcut text and action id only.
    Plain,
}

/// Translates key presses from one keymap to another.
pub struct Translator<'a> {
    actions: &'a dyn ActionLookup,
    renderer: ShortcutRenderer,
    detail: Detail,
}

impl<'a> Translator<'a> {
    pub fn new(actions: &'a dyn ActionLookup, renderer: ShortcutRenderer) -> Self {
        Self {
            actions,
            renderer,
            detail: Detail::Full,
        }
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Every shortcut in `target` for the actions `combo` triggers in `source`.
    ///
    /// Results keep source action order, then target shortcut order. A result
    /// repeating an earlier (shortcut text, action) pair is dropped; aliases of
    /// one action count as the same action, and `target` is asked for the
    /// canonical id and every alias whichever one `source` binds. No binding
    /// gives an empty vector.
    pub fn translate(
        &self,
        combo: &KeyCombo,
        source: &dyn KeymapLookup,
        target: &dyn KeymapLookup,
    ) -> Vec<TranslationResult> {
        let action_ids = source.action_ids(combo);
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut results: Vec<TranslationResult> = Vec::new();

        for action_id in &action_ids {
            let identity = canonical_id(self.actions, action_id).to_string();
            let shortcuts = self
                .names_of(action_id)
                .into_iter()
                .flat_map(|id| target.shortcuts(id));
            for shortcut in shortcuts {
                let shortcut_text = self.renderer.shortcut_text(&shortcut);
                if !seen.insert((shortcut_text.clone(), identity.clone())) {
                    continue;
                }
                results.push(self.result(shortcut_text, action_id));
            }
        }

        debug!(
            source = source.name(),
            target = target.name(),
            combo = %combo,
            actions = action_ids.len(),
            results = results.len(),
            "translated shortcut"
        );
        results
    }

    /// `action_id` followed by the other ids of the action it resolves to.
    fn names_of<'b>(&'b self, action_id: &'b str) -> Vec<&'b str> {
        let mut ids = vec![action_id];
        if let Some(action) = self.actions.resolve(action_id) {
            for id in std::iter::once(&action.id).chain(&action.aliases) {
                if !ids.contains(&id.as_str()) {
                    ids.push(id.as_str());
                }
            }
        }
        ids
    }

    fn result(&self, shortcut_text: String, action_id: &str) -> TranslationResult {
        match self.detail {
            Detail::Plain => TranslationResult {
                shortcut_text,
                action_id: action_id.to_string(),
                display_name: None,
                group_label: None,
                icon: None,
                description: String::new(),
            },
            Detail::Full => {
                let description = describe(action_id, self.actions);
                TranslationResult {
                    shortcut_text,
                    action_id: action_id.to_string(),
                    display_name: description.display_name,
                    group_label: description.group_label,
                    icon: description.icon,
                    description: description.text,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionCatalog, MenuGroup};
    use crate::keymap::{Keymap, KeymapRegistry};
    use crate::keys::Shortcut;

    fn shortcut(input: &str) -> Shortcut {
        input.parse().expect("shortcut")
    }

    fn combo(input: &str) -> KeyCombo {
        input.parse().expect("combo")
    }

    fn catalog() -> ActionCatalog {
        ActionCatalog::new(
            vec![
                Action::new("SaveAll")
                    .text("Save All")
                    .description("Save all files")
                    .icon("💾"),
                Action::new("CloseContent").text("Close Tab").alias("CloseEditor"),
                Action::new("Find").text("Find..."),
                Action::new("FindWord").text("Find..."),
            ],
            MenuGroup::unnamed().group(MenuGroup::new("File").action("SaveAll")),
        )
        .expect("catalog")
    }

    fn registry() -> KeymapRegistry {
        let mut source = Keymap::new("source");
        source.bind("SaveAll", shortcut("Ctrl+Alt+S"));
        source.bind("CloseContent", shortcut("Ctrl+W"));
        source.bind("CloseEditor", shortcut("Ctrl+W"));
        source.bind("Find", shortcut("Ctrl+F"));
        source.bind("FindWord", shortcut("Ctrl+F"));
        source.bind("Unregistered", shortcut("F7"));

        let mut target = Keymap::new("target");
        target.bind("SaveAll", shortcut("Ctrl+S"));
        target.bind("SaveAll", shortcut("Ctrl+Shift+S"));
        target.bind("CloseContent", shortcut("Ctrl+F4"));
        target.bind("CloseEditor", shortcut("Ctrl+F4"));
        target.bind("Find", shortcut("Ctrl+F"));
        target.bind("FindWord", shortcut("Ctrl+F"));
        target.bind("Unregistered", shortcut("F8"));

        KeymapRegistry::new(vec![source, target], "target").expect("registry")
    }

    #[test]
    fn save_all_scenario() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("Ctrl+Alt+S"), &source, &target);
        let texts: Vec<&str> = results.iter().map(|r| r.shortcut_text.as_str()).collect();
        assert_eq!(texts, vec!["Ctrl+S", "Ctrl+Shift+S"]);
        assert!(results.iter().all(|r| r.action_id == "SaveAll"));
        assert_eq!(results[0].description, "Save All: Save all files (File)");
        assert_eq!(results[0].icon.as_deref(), Some("💾"));
        assert_eq!(results[0].group_label.as_deref(), Some("File"));
    }

    #[test]
    fn unbound_combo_yields_nothing() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");
        assert!(translator.translate(&combo("F13"), &source, &target).is_empty());
    }

    #[test]
    fn aliases_of_one_action_are_merged() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("Ctrl+W"), &source, &target);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shortcut_text, "Ctrl+F4");
        assert_eq!(results[0].action_id, "CloseContent");
    }

    #[test]
    fn canonical_source_finds_alias_bound_in_target() {
        let catalog = catalog();
        let mut source = Keymap::new("source");
        source.bind("CloseContent", shortcut("Ctrl+W"));
        let mut target = Keymap::new("target");
        target.bind("CloseEditor", shortcut("Ctrl+X, K"));
        let registry = KeymapRegistry::new(vec![source, target], "source").expect("registry");
        let translator =
            Translator::new(&catalog, ShortcutRenderer::default()).with_detail(Detail::Plain);
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("Ctrl+W"), &source, &target);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shortcut_text, "Ctrl+X, K");
        assert_eq!(results[0].action_id, "CloseContent");
    }

    #[test]
    fn distinct_actions_with_same_text_are_kept() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("Ctrl+F"), &source, &target);
        let ids: Vec<&str> = results.iter().map(|r| r.action_id.as_str()).collect();
        assert_eq!(ids, vec!["Find", "FindWord"]);
        assert!(results.iter().all(|r| r.shortcut_text == "Ctrl+F"));
        assert!(results.iter().all(|r| r.description == "Find..."));
    }

    #[test]
    fn unknown_actions_still_translate_without_description() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("F7"), &source, &target);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shortcut_text, "F8");
        assert!(results[0].description.is_empty());
        assert!(results[0].icon.is_none());
    }

    #[test]
    fn identity_translation_returns_the_combo() {
        let registry = registry();
        let catalog = catalog();
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let target = registry.get("target").expect("target");

        for input in ["Ctrl+S", "Ctrl+Shift+S", "Ctrl+F4", "F8"] {
            let results = translator.translate(&combo(input), &target, &target);
            assert!(!results.is_empty());
            assert!(results.iter().any(|r| r.shortcut_text == input));
        }
    }

    #[test]
    fn plain_detail_skips_descriptions() {
        let registry = registry();
        let catalog = catalog();
        let translator =
            Translator::new(&catalog, ShortcutRenderer::default()).with_detail(Detail::Plain);
        let source = registry.get("source").expect("source");
        let target = registry.get("target").expect("target");

        let results = translator.translate(&combo("Ctrl+Alt+S"), &source, &target);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.description.is_empty() && r.icon.is_none()));
    }
}
