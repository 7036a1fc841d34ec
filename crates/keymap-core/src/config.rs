//! User configuration: extra keymaps and actions loaded from TOML.
//!
//! Both files are optional. Loaders never fail on bad user input; problems
//! are returned as warnings and the offending entry (or file) is skipped.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::actions::{Action, ActionCatalog, MenuGroup, MenuItem};
use crate::defaults::{self, DEFAULT_KEYMAP};
use crate::error::{KeymapError, Result};
use crate::keymap::{Keymap, KeymapRegistry};
use crate::keys::Shortcut;
use crate::render::RenderStyle;

pub const APP_NAME: &str = "shortcut-translator";

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_BINDINGS_PER_KEYMAP: usize = 1_024;
const MAX_USER_ACTIONS: usize = 4_096;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapsFile {
    meta: Option<KeymapsMeta>,
    keymaps: Option<BTreeMap<String, KeymapEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapsMeta {
    active: Option<String>,
    style: Option<RenderStyle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapEntry {
    description: Option<String>,
    parent: Option<String>,
    bindings: Option<BTreeMap<String, BindingValue>>,
}

/// `Action = "Ctrl+S"` or `Action = ["Ctrl+S", "Ctrl+Shift+S"]`; `[]` unbinds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BindingValue {
    One(String),
    Many(Vec<String>),
}

impl BindingValue {
    fn as_slice(&self) -> &[String] {
        match self {
            BindingValue::One(text) => std::slice::from_ref(text),
            BindingValue::Many(texts) => texts,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionsFile {
    actions: Option<BTreeMap<String, ActionEntry>>,
    menu: Option<Vec<MenuEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionEntry {
    text: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuEntry {
    group: String,
    #[serde(default)]
    actions: Vec<String>,
}

/// Keymaps ready for translation plus the render style the user asked for.
#[derive(Clone, Debug)]
pub struct LoadedKeymaps {
    pub registry: KeymapRegistry,
    pub style: RenderStyle,
}

pub fn config_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", APP_NAME)?;
    Some(proj.config_dir().to_path_buf())
}

pub fn user_keymaps_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymaps.toml"))
}

pub fn user_actions_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("actions.toml"))
}

/// Read a config file, refusing anything over 1 MiB.
pub(crate) fn read_limited(path: &Path) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_CONFIG_FILE_BYTES {
        return Err(KeymapError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_CONFIG_FILE_BYTES,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Built-in keymaps merged with the user's `keymaps.toml`.
///
/// `keymap_file` is read when given; otherwise the file in the config dir is
/// read if `user_config` is set. A user keymap named like a built-in replaces
/// it. Only a broken built-in set is an error.
pub fn load_keymaps(
    keymap_file: Option<&Path>,
    user_config: bool,
) -> Result<(LoadedKeymaps, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    let fallback = user_config.then(user_keymaps_path).flatten();
    let file: Option<KeymapsFile> = read_config(keymap_file, fallback, "Keymap", &mut warnings);

    let meta = file.as_ref().and_then(|file| file.meta.as_ref());
    let style = meta
        .and_then(|meta| meta.style)
        .unwrap_or_else(RenderStyle::platform_default);
    let requested_active = meta
        .and_then(|meta| meta.active.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let mut keymaps = defaults::keymaps();
    if let Some(entries) = file.as_ref().and_then(|file| file.keymaps.as_ref()) {
        for (name, entry) in entries {
            match build_user_keymap(name, entry) {
                Ok(keymap) => merge_keymap(&mut keymaps, keymap),
                Err(errs) => warnings.extend(errs),
            }
        }
    }
    drop_orphans(&mut keymaps, &mut warnings);

    let active = match requested_active {
        Some(name) if keymaps.iter().any(|keymap| keymap.name == name) => name.to_string(),
        Some(name) => {
            warnings.push(format!(
                "Active keymap '{name}' not found; using '{DEFAULT_KEYMAP}'"
            ));
            DEFAULT_KEYMAP.to_string()
        }
        None => DEFAULT_KEYMAP.to_string(),
    };
    let active = if keymaps.iter().any(|keymap| keymap.name == active) {
        active
    } else {
        keymaps
            .first()
            .map(|keymap| keymap.name.clone())
            .unwrap_or(active)
    };

    let registry = match KeymapRegistry::new(keymaps, &active) {
        Ok(registry) => registry,
        Err(err) => {
            warnings.push(format!("{err}; using built-in keymaps only"));
            defaults::registry()?
        }
    };
    debug!(
        keymaps = registry.len(),
        active = registry.active_index(),
        style = style.name(),
        "loaded keymaps"
    );
    Ok((LoadedKeymaps { registry, style }, warnings))
}

/// Built-in actions merged with the user's `actions.toml`.
///
/// User actions replace built-ins with the same id. Menu entries append to
/// the top-level group with that name, creating it when missing.
pub fn load_actions(
    actions_file: Option<&Path>,
    user_config: bool,
) -> Result<(ActionCatalog, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    let fallback = user_config.then(user_actions_path).flatten();
    let file: Option<ActionsFile> = read_config(actions_file, fallback, "Actions", &mut warnings);

    let Some(file) = file else {
        return Ok((defaults::catalog()?, warnings));
    };

    let mut actions = defaults::actions();
    let mut menu = defaults::main_menu();

    if let Some(entries) = file.actions {
        if entries.len() > MAX_USER_ACTIONS {
            warnings.push(format!(
                "Too many actions: {} (max {MAX_USER_ACTIONS})",
                entries.len()
            ));
        } else {
            for (id, entry) in entries {
                let action = user_action(id, entry);
                match actions.iter_mut().find(|existing| existing.id == action.id) {
                    Some(existing) => *existing = action,
                    None => actions.push(action),
                }
            }
        }
    }

    for entry in file.menu.unwrap_or_default() {
        let group = entry.group.trim();
        if group.is_empty() {
            warnings.push("Menu entry with an empty group name skipped".to_string());
            continue;
        }
        match menu.child_group_mut(group) {
            Some(existing) => existing
                .children
                .extend(entry.actions.into_iter().map(MenuItem::Action)),
            None => menu = menu.group(MenuGroup::new(group).actions(entry.actions)),
        }
    }

    let catalog = match ActionCatalog::new(actions, menu) {
        Ok(catalog) => catalog,
        Err(err) => {
            warnings.push(format!("{err}; using built-in actions only"));
            defaults::catalog()?
        }
    };
    debug!(actions = catalog.len(), "loaded actions");
    Ok((catalog, warnings))
}

fn read_config<T: DeserializeOwned>(
    explicit: Option<&Path>,
    fallback: Option<PathBuf>,
    kind: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let path = explicit.map(Path::to_path_buf).or(fallback)?;
    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("{kind} file not found: {}", path.display()));
        }
        return None;
    }
    let content = match read_limited(&path) {
        Ok(content) => content,
        Err(err @ KeymapError::TooLarge { .. }) => {
            warnings.push(err.to_string());
            return None;
        }
        Err(err) => {
            warnings.push(format!("Failed to read {}: {err}", path.display()));
            return None;
        }
    };
    match toml::from_str::<T>(&content) {
        Ok(parsed) => {
            debug!(path = %path.display(), "read {kind} file");
            Some(parsed)
        }
        Err(err) => {
            warnings.push(format!("Failed to parse {}: {err}", path.display()));
            None
        }
    }
}

fn build_user_keymap(name: &str, entry: &KeymapEntry) -> std::result::Result<Keymap, Vec<String>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(vec!["Keymap with an empty name skipped".to_string()]);
    }

    let mut keymap = Keymap::new(name);
    keymap.description = entry.description.clone();
    keymap.parent = entry
        .parent
        .as_deref()
        .map(str::trim)
        .filter(|parent| !parent.is_empty())
        .map(str::to_string);

    let Some(bindings) = entry.bindings.as_ref() else {
        return Ok(keymap);
    };
    let total: usize = bindings.values().map(|value| value.as_slice().len()).sum();
    if total > MAX_BINDINGS_PER_KEYMAP {
        return Err(vec![format!(
            "Too many bindings in keymap '{name}': {total} (max {MAX_BINDINGS_PER_KEYMAP})"
        )]);
    }

    let mut errors: Vec<String> = Vec::new();
    for (action_id, value) in bindings {
        let texts = value.as_slice();
        if texts.is_empty() {
            keymap.unbind(action_id.as_str());
            continue;
        }
        for text in texts {
            match text.parse::<Shortcut>() {
                Ok(shortcut) => keymap.bind(action_id.as_str(), shortcut),
                Err(err) => errors.push(format!("Keymap '{name}', action '{action_id}': {err}")),
            }
        }
    }

    if errors.is_empty() {
        Ok(keymap)
    } else {
        errors.push(format!("Keymap '{name}' skipped"));
        Err(errors)
    }
}

fn merge_keymap(keymaps: &mut Vec<Keymap>, keymap: Keymap) {
    match keymaps.iter_mut().find(|existing| existing.name == keymap.name) {
        Some(existing) => *existing = keymap,
        None => keymaps.push(keymap),
    }
}

/// Remove keymaps whose parent is missing, repeating until none are left.
fn drop_orphans(keymaps: &mut Vec<Keymap>, warnings: &mut Vec<String>) {
    loop {
        let names: HashSet<String> = keymaps.iter().map(|keymap| keymap.name.clone()).collect();
        let before = keymaps.len();
        keymaps.retain(|keymap| match keymap.parent.as_deref() {
            Some(parent) if !names.contains(parent) => {
                warnings.push(format!(
                    "Keymap '{}' has unknown parent '{parent}'; skipped",
                    keymap.name
                ));
                false
            }
            _ => true,
        });
        if keymaps.len() == before {
            break;
        }
    }
}

fn user_action(id: String, entry: ActionEntry) -> Action {
    Action {
        id,
        text: entry.text,
        description: entry.description,
        icon: entry.icon,
        aliases: entry.aliases,
    }
}
