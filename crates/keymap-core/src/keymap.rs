//! Named keymaps and the registry that holds them.
//!
//! A keymap may inherit from a parent. An action bound (or explicitly unbound)
//! in the child overrides all of the parent's shortcuts for that action; every
//! other action keeps the parent's shortcuts.
//!
//! Once [`KeymapRegistry::resolve_aliases`] has run, an alias and its canonical
//! id name the same action in every comparison.

use std::collections::{HashMap, HashSet};

use crate::actions::{ActionLookup, canonical_id};
use crate::error::{KeymapError, Result};
use crate::keys::{KeyCombo, Shortcut};

/// The query contract the translator needs from a keymap.
pub trait KeymapLookup {
    fn name(&self) -> &str;

    /// Action ids bound to a shortcut that starts with `combo`, without duplicates.
    fn action_ids(&self, combo: &KeyCombo) -> Vec<String>;

    /// Every shortcut bound to `action_id`, possibly none.
    fn shortcuts(&self, action_id: &str) -> Vec<Shortcut>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub shortcut: Shortcut,
    pub action_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    pub name: String,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub bindings: Vec<Binding>,
    /// Actions with no shortcut in this keymap even if the parent binds them.
    pub unbound: Vec<String>,
}

impl Keymap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent: None,
            bindings: Vec::new(),
            unbound: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn bind(&mut self, action_id: impl Into<String>, shortcut: Shortcut) {
        self.bindings.push(Binding {
            shortcut,
            action_id: action_id.into(),
        });
    }

    pub fn unbind(&mut self, action_id: impl Into<String>) {
        let action_id = action_id.into();
        if !self.unbound.contains(&action_id) {
            self.unbound.push(action_id);
        }
    }

    fn own_action_ids<'a>(&'a self, combo: &'a KeyCombo) -> impl Iterator<Item = &'a str> + 'a {
        self.bindings
            .iter()
            .filter(move |binding| binding.shortcut.starts_with(combo))
            .map(|binding| binding.action_id.as_str())
    }

    fn action_id_names(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .map(|binding| binding.action_id.as_str())
            .chain(self.unbound.iter().map(String::as_str))
    }
}

/// All keymaps known to the application, with one of them active.
#[derive(Clone, Debug)]
pub struct KeymapRegistry {
    keymaps: Vec<Keymap>,
    active: usize,
    /// Bound ids that are aliases, mapped to their canonical id.
    canonical: HashMap<String, String>,
}

impl KeymapRegistry {
    /// Build a registry, checking that names are unique, every parent exists,
    /// no keymap inherits from itself and `active` is registered.
    pub fn new(keymaps: Vec<Keymap>, active: &str) -> Result<Self> {
        let mut names: HashSet<&str> = HashSet::new();
        for keymap in &keymaps {
            if !names.insert(keymap.name.as_str()) {
                return Err(KeymapError::DuplicateKeymap(keymap.name.clone()));
            }
        }
        for keymap in &keymaps {
            if let Some(parent) = keymap.parent.as_deref()
                && !names.contains(parent)
            {
                return Err(KeymapError::UnknownParent {
                    keymap: keymap.name.clone(),
                    parent: parent.to_string(),
                });
            }
        }
        for keymap in &keymaps {
            let mut current = keymap.parent.as_deref();
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if parent == keymap.name || steps > keymaps.len() {
                    return Err(KeymapError::ParentCycle(keymap.name.clone()));
                }
                current = keymaps
                    .iter()
                    .find(|candidate| candidate.name == parent)
                    .and_then(|candidate| candidate.parent.as_deref());
            }
        }
        let active = keymaps
            .iter()
            .position(|keymap| keymap.name == active)
            .ok_or_else(|| KeymapError::UnknownActiveKeymap(active.to_string()))?;
        Ok(Self {
            keymaps,
            active,
            canonical: HashMap::new(),
        })
    }

    /// Treat every bound alias in `actions` as its canonical action, so a child
    /// binding `CloseEditor` overrides a parent's `CloseContent`.
    pub fn resolve_aliases(&mut self, actions: &dyn ActionLookup) {
        let mut canonical: HashMap<String, String> = HashMap::new();
        for id in self.keymaps.iter().flat_map(Keymap::action_id_names) {
            let resolved = canonical_id(actions, id);
            if resolved != id {
                canonical.insert(id.to_string(), resolved.to_string());
            }
        }
        self.canonical = canonical;
    }

    /// Whether `a` and `b` name the same action.
    pub fn same_action(&self, a: &str, b: &str) -> bool {
        self.identity(a) == self.identity(b)
    }

    fn identity<'a>(&'a self, id: &'a str) -> &'a str {
        self.canonical.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Keymaps in registration order.
    pub fn all(&self) -> &[Keymap] {
        &self.keymaps
    }

    pub fn names(&self) -> Vec<&str> {
        self.keymaps.iter().map(|keymap| keymap.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.keymaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keymaps.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.keymaps.iter().position(|keymap| keymap.name == name)
    }

    pub fn get(&self, name: &str) -> Option<KeymapView<'_>> {
        self.position(name).and_then(|index| self.at(index))
    }

    pub fn at(&self, index: usize) -> Option<KeymapView<'_>> {
        self.keymaps.get(index).map(|keymap| KeymapView {
            registry: self,
            keymap,
        })
    }

    pub fn active(&self) -> KeymapView<'_> {
        KeymapView {
            registry: self,
            keymap: &self.keymaps[self.active],
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }
}

/// A registered keymap with its parent chain resolved through the registry.
#[derive(Clone, Copy, Debug)]
pub struct KeymapView<'a> {
    registry: &'a KeymapRegistry,
    keymap: &'a Keymap,
}

impl<'a> KeymapView<'a> {
    pub fn keymap(&self) -> &'a Keymap {
        self.keymap
    }

    pub fn parent(&self) -> Option<KeymapView<'a>> {
        self.keymap
            .parent
            .as_deref()
            .and_then(|parent| self.registry.get(parent))
    }

    /// Whether this keymap decides the shortcuts of `action_id` itself.
    pub fn overrides(&self, action_id: &str) -> bool {
        self.keymap
            .action_id_names()
            .any(|id| self.registry.same_action(id, action_id))
    }

    fn own_shortcuts(&self, action_id: &str) -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = Vec::new();
        for binding in &self.keymap.bindings {
            if self.registry.same_action(&binding.action_id, action_id)
                && !shortcuts.contains(&binding.shortcut)
            {
                shortcuts.push(binding.shortcut);
            }
        }
        shortcuts
    }

    fn push_new(&self, ids: &mut Vec<String>, id: &str) {
        if !ids.iter().any(|seen| self.registry.same_action(seen, id)) {
            ids.push(id.to_string());
        }
    }
}

impl KeymapLookup for KeymapView<'_> {
    fn name(&self) -> &str {
        &self.keymap.name
    }

    fn action_ids(&self, combo: &KeyCombo) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.keymap.own_action_ids(combo) {
            self.push_new(&mut ids, id);
        }
        if let Some(parent) = self.parent() {
            for id in parent.action_ids(combo) {
                if !self.overrides(&id) {
                    self.push_new(&mut ids, &id);
                }
            }
        }
        ids
    }

    fn shortcuts(&self, action_id: &str) -> Vec<Shortcut> {
        if self.overrides(action_id) {
            return self.own_shortcuts(action_id);
        }
        self.parent()
            .map(|parent| parent.shortcuts(action_id))
            .unwrap_or_default()
    }
}
