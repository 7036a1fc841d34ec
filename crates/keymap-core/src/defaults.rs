//! Built-in keymaps and action catalog.

use tracing::warn;

use crate::actions::{Action, ActionCatalog, MenuGroup};
use crate::error::Result;
use crate::keymap::{Keymap, KeymapRegistry};
use crate::keys::Shortcut;

/// Name of the keymap every built-in keymap derives from.
pub const DEFAULT_KEYMAP: &str = "$default";

const DEFAULT_BINDINGS: &[(&str, &[&str])] = &[
    ("SaveAll", &["Ctrl+S"]),
    ("ShowSettings", &["Ctrl+Alt+S"]),
    ("CloseContent", &["Ctrl+F4"]),
    ("$Undo", &["Ctrl+Z"]),
    ("$Redo", &["Ctrl+Shift+Z"]),
    ("$Cut", &["Ctrl+X", "Shift+Delete"]),
    ("$Copy", &["Ctrl+C", "Ctrl+Insert"]),
    ("$Paste", &["Ctrl+V", "Shift+Insert"]),
    ("$Delete", &["Delete"]),
    ("$SelectAll", &["Ctrl+A"]),
    ("EditorDuplicate", &["Ctrl+D"]),
    ("EditorDeleteLine", &["Ctrl+Y"]),
    ("Find", &["Ctrl+F"]),
    ("Replace", &["Ctrl+R"]),
    ("FindInPath", &["Ctrl+Shift+F"]),
    ("GotoClass", &["Ctrl+N"]),
    ("GotoFile", &["Ctrl+Shift+N"]),
    ("GotoLine", &["Ctrl+G"]),
    ("GotoDeclaration", &["Ctrl+B"]),
    ("FileStructurePopup", &["Ctrl+F12"]),
    ("NextTab", &["Alt+Right"]),
    ("PreviousTab", &["Alt+Left"]),
    ("ShowIntentionActions", &["Alt+Enter"]),
    ("ReformatCode", &["Ctrl+Alt+L"]),
    ("OptimizeImports", &["Ctrl+Alt+O"]),
    ("CommentByLineComment", &["Ctrl+/"]),
    ("CommentByBlockComment", &["Ctrl+Shift+/"]),
    ("QuickJavaDoc", &["Ctrl+Q"]),
    ("ParameterInfo", &["Ctrl+P"]),
    ("RenameElement", &["Shift+F6"]),
    ("ExtractMethod", &["Ctrl+Alt+M"]),
    ("Run", &["Shift+F10"]),
    ("Debug", &["Shift+F9"]),
];

const ECLIPSE_BINDINGS: &[(&str, &[&str])] = &[
    ("$Redo", &["Ctrl+Y"]),
    ("CloseContent", &["Ctrl+W", "Ctrl+F4"]),
    ("EditorDuplicate", &["Ctrl+Alt+Down"]),
    ("EditorDeleteLine", &["Ctrl+D"]),
    ("Replace", &[]),
    ("FindInPath", &["Ctrl+H"]),
    ("GotoClass", &["Ctrl+Shift+T"]),
    ("GotoFile", &["Ctrl+Shift+R"]),
    ("GotoLine", &["Ctrl+L"]),
    ("GotoDeclaration", &["F3"]),
    ("FileStructurePopup", &["Ctrl+O"]),
    ("ShowIntentionActions", &["Ctrl+1"]),
    ("ReformatCode", &["Ctrl+Shift+F"]),
    ("OptimizeImports", &["Ctrl+Shift+O"]),
    ("CommentByLineComment", &["Ctrl+/", "Ctrl+Shift+C"]),
    ("QuickJavaDoc", &["F2"]),
    ("RenameElement", &["Alt+Shift+R"]),
    ("ExtractMethod", &["Alt+Shift+M"]),
    ("Run", &["Ctrl+F11"]),
    ("Debug", &["F11"]),
];

const EMACS_BINDINGS: &[(&str, &[&str])] = &[
    ("SaveAll", &["C-x, C-s"]),
    ("CloseEditor", &["C-x, k"]),
    ("$Undo", &["C-/", "C-x, u"]),
    ("$Cut", &["C-w"]),
    ("$Copy", &["M-w"]),
    ("$Paste", &["C-y"]),
    ("$SelectAll", &["C-x, h"]),
    ("EditorDeleteLine", &["C-k"]),
    ("Find", &["C-s"]),
    ("Replace", &["M-%"]),
    ("GotoFile", &["C-x, C-f"]),
    ("GotoLine", &["M-g, g"]),
    ("GotoDeclaration", &["M-."]),
    ("CommentByLineComment", &["M-;"]),
    ("ShowIntentionActions", &["M-RET"]),
];

/// `$default`, `Eclipse` and `Emacs`, in that order.
pub fn keymaps() -> Vec<Keymap> {
    vec![
        build_keymap(
            Keymap::new(DEFAULT_KEYMAP).with_description("Default IDE bindings"),
            DEFAULT_BINDINGS,
        ),
        build_keymap(
            Keymap::new("Eclipse")
                .with_parent(DEFAULT_KEYMAP)
                .with_description("Eclipse-style bindings"),
            ECLIPSE_BINDINGS,
        ),
        build_keymap(
            Keymap::new("Emacs")
                .with_parent(DEFAULT_KEYMAP)
                .with_description("Emacs-style bindings"),
            EMACS_BINDINGS,
        ),
    ]
}

/// Registry of the built-in keymaps with `$default` active, aliases resolved
/// against the built-in catalog.
pub fn registry() -> Result<KeymapRegistry> {
    let mut registry = KeymapRegistry::new(keymaps(), DEFAULT_KEYMAP)?;
    registry.resolve_aliases(&catalog()?);
    Ok(registry)
}

fn build_keymap(mut keymap: Keymap, table: &[(&str, &[&str])]) -> Keymap {
    for (action_id, shortcuts) in table {
        if shortcuts.is_empty() {
            keymap.unbind(*action_id);
            continue;
        }
        for text in shortcuts.iter() {
            match text.parse::<Shortcut>() {
                Ok(shortcut) => keymap.bind(*action_id, shortcut),
                Err(err) => warn!(keymap = %keymap.name, action = action_id, "skipping built-in binding: {err}"),
            }
        }
    }
    keymap
}

/// Actions referenced by the built-in keymaps, with the main menu.
pub fn catalog() -> Result<ActionCatalog> {
    ActionCatalog::new(actions(), main_menu())
}

pub fn actions() -> Vec<Action> {
    vec![
        Action::new("SaveAll")
            .text("Save All")
            .description("Save all files and settings")
            .icon("💾"),
        Action::new("ShowSettings")
            .text("Settings...")
            .description("Edit application settings")
            .icon("⚙"),
        Action::new("CloseContent")
            .text("Close Tab")
            .alias("CloseEditor"),
        Action::new("$Undo")
            .text("Undo")
            .description("Undo last operation")
            .icon("↶"),
        Action::new("$Redo")
            .text("Redo")
            .description("Redo last undone operation")
            .icon("↷"),
        Action::new("$Cut")
            .text("Cut")
            .description("Cut to clipboard")
            .icon("✂"),
        Action::new("$Copy")
            .text("Copy")
            .description("Copy to clipboard"),
        Action::new("$Paste")
            .text("Paste")
            .description("Paste from clipboard"),
        Action::new("$Delete"),
        Action::new("$SelectAll")
            .text("Select All")
            .description("Select all text"),
        Action::new("EditorDuplicate").text("Duplicate Line or Selection"),
        Action::new("EditorDeleteLine").text("Delete Line"),
        Action::new("Find")
            .text("Find...")
            .description("Find a string in the active editor")
            .icon("🔍"),
        Action::new("Replace")
            .text("Replace...")
            .description("Replace a string in the active editor"),
        Action::new("FindInPath")
            .text("Find in Files...")
            .description("Find a string in the project"),
        Action::new("GotoClass")
            .text("Class...")
            .description("Navigate to a class by name"),
        Action::new("GotoFile")
            .text("File...")
            .description("Navigate to a file by name"),
        Action::new("GotoLine")
            .text("Line/Column...")
            .description("Navigate to a line and column"),
        Action::new("GotoDeclaration").text("Declaration or Usages"),
        Action::new("FileStructurePopup")
            .text("File Structure")
            .description("Show the structure of the current file"),
        Action::new("NextTab").text("Select Next Tab"),
        Action::new("PreviousTab").text("Select Previous Tab"),
        Action::new("ShowIntentionActions")
            .text("Show Context Actions")
            .description("Show intention actions and quick fixes")
            .icon("💡"),
        Action::new("ReformatCode")
            .text("Reformat Code")
            .description("Reformat code according to the code style"),
        Action::new("OptimizeImports")
            .text("Optimize Imports")
            .description("Remove unused imports and reorder the rest"),
        Action::new("CommentByLineComment")
            .text("Comment with Line Comment")
            .description("Comment or uncomment the current line or selection"),
        Action::new("CommentByBlockComment")
            .text("Comment with Block Comment")
            .description("Wrap the selection in a block comment"),
        Action::new("QuickJavaDoc")
            .text("Quick Documentation")
            .description("Show documentation for the symbol at caret"),
        Action::new("ParameterInfo").text("Parameter Info"),
        Action::new("RenameElement")
            .text("Rename...")
            .description("Rename the selected symbol and its usages"),
        Action::new("ExtractMethod")
            .text("Method...")
            .description("Extract the selection into a new method"),
        Action::new("Run")
            .text("Run")
            .description("Run the selected configuration")
            .icon("▶"),
        Action::new("Debug")
            .text("Debug")
            .description("Debug the selected configuration")
            .icon("🐞"),
    ]
}

pub fn main_menu() -> MenuGroup {
    MenuGroup::unnamed()
        .group(
            MenuGroup::new("File")
                .action("SaveAll")
                .separator()
                .action("ShowSettings")
                .action("CloseContent"),
        )
        .group(
            MenuGroup::new("Edit")
                .actions(["$Undo", "$Redo"])
                .separator()
                .actions(["$Cut", "$Copy", "$Paste", "$Delete"])
                .group(MenuGroup::unnamed().actions([
                    "$SelectAll",
                    "EditorDuplicate",
                    "EditorDeleteLine",
                ]))
                .group(MenuGroup::new("Find").actions(["Find", "Replace", "FindInPath"])),
        )
        .group(
            MenuGroup::new("Navigate")
                .actions(["GotoClass", "GotoFile", "GotoLine", "GotoDeclaration"])
                .separator()
                .actions(["FileStructurePopup", "NextTab", "PreviousTab"]),
        )
        .group(MenuGroup::new("Code").actions([
            "ShowIntentionActions",
            "ReformatCode",
            "OptimizeImports",
            "CommentByLineComment",
            "CommentByBlockComment",
            "QuickJavaDoc",
            "ParameterInfo",
        ]))
        .group(
            MenuGroup::new("Refactor")
                .action("RenameElement")
                .group(MenuGroup::new("Extract/Introduce").action("ExtractMethod")),
        )
        .group(MenuGroup::new("Run").actions(["Run", "Debug"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionLookup;
    use crate::keymap::KeymapLookup;
    use crate::render::ShortcutRenderer;
    use crate::translate::{Detail, Translator};

    fn bindings(keymaps: &[Keymap]) -> usize {
        keymaps.iter().map(|keymap| keymap.bindings.len()).sum()
    }

    fn table_bindings(table: &[(&str, &[&str])]) -> usize {
        table.iter().map(|(_, shortcuts)| shortcuts.len()).sum()
    }

    #[test]
    fn every_built_in_binding_parses() {
        let expected = table_bindings(DEFAULT_BINDINGS)
            + table_bindings(ECLIPSE_BINDINGS)
            + table_bindings(EMACS_BINDINGS);
        assert_eq!(bindings(&keymaps()), expected);
    }

    #[test]
    fn built_ins_form_a_valid_registry_and_catalog() {
        let registry = registry().expect("registry");
        assert_eq!(registry.names(), vec!["$default", "Eclipse", "Emacs"]);
        assert_eq!(registry.active().name(), DEFAULT_KEYMAP);
        assert!(catalog().is_ok());
    }

    #[test]
    fn every_bound_action_is_in_the_catalog() {
        let catalog = catalog().expect("catalog");
        for keymap in keymaps() {
            for binding in &keymap.bindings {
                assert!(
                    catalog.resolve(&binding.action_id).is_some(),
                    "{} is not in the catalog",
                    binding.action_id
                );
            }
        }
    }

    #[test]
    fn eclipse_delete_line_translates_to_default() {
        let registry = registry().expect("registry");
        let catalog = catalog().expect("catalog");
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let eclipse = registry.get("Eclipse").expect("eclipse");
        let combo = "Ctrl+D".parse().expect("combo");

        let results = translator.translate(&combo, &eclipse, &registry.active());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shortcut_text, "Ctrl+Y");
        assert_eq!(results[0].description, "Delete Line (Edit)");
    }

    #[test]
    fn emacs_close_editor_alias_resolves() {
        let registry = registry().expect("registry");
        let catalog = catalog().expect("catalog");
        let translator = Translator::new(&catalog, ShortcutRenderer::default());
        let emacs = registry.get("Emacs").expect("emacs");
        let eclipse = registry.get("Eclipse").expect("eclipse");
        let combo = "C-x".parse().expect("combo");

        let results = translator.translate(&combo, &emacs, &eclipse);
        let close: Vec<&str> = results
            .iter()
            .filter(|result| result.action_id == "CloseEditor")
            .map(|result| result.shortcut_text.as_str())
            .collect();
        assert_eq!(close, vec!["Ctrl+W", "Ctrl+F4"]);
        assert!(results.iter().any(|result| result.shortcut_text == "Ctrl+S"));
    }

    #[test]
    fn eclipse_close_translates_to_emacs_binding() {
        let registry = registry().expect("registry");
        let catalog = catalog().expect("catalog");
        let translator =
            Translator::new(&catalog, ShortcutRenderer::default()).with_detail(Detail::Plain);
        let eclipse = registry.get("Eclipse").expect("eclipse");
        let emacs = registry.get("Emacs").expect("emacs");
        let combo = "Ctrl+W".parse().expect("combo");

        let results = translator.translate(&combo, &eclipse, &emacs);
        let pairs: Vec<(&str, &str)> = results
            .iter()
            .map(|result| (result.shortcut_text.as_str(), result.action_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Ctrl+X, K", "CloseContent")]);
        // Emacs binds the alias, which replaces $default's Ctrl+F4.
        assert!(emacs.action_ids(&"Ctrl+F4".parse().expect("combo")).is_empty());
    }
}
