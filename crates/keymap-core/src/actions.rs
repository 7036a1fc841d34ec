//! Action catalog and main menu tree.

use std::collections::HashMap;

use crate::error::{KeymapError, Result};

/// The query contract [`describe`](crate::describe) needs from an action registry.
pub trait ActionLookup {
    /// Resolve an action id or alias.
    fn resolve(&self, id: &str) -> Option<&Action>;

    /// Root of the menu tree used to find an action's group.
    fn main_menu(&self) -> &MenuGroup;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub text: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Other ids that resolve to this action.
    pub aliases: Vec<String>,
}

impl Action {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Action(String),
    Group(MenuGroup),
    Separator,
}

/// A menu container. Groups may carry an id of their own, in which case the
/// group is itself an action that can be bound to a shortcut.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuGroup {
    pub id: Option<String>,
    pub text: Option<String>,
    pub children: Vec<MenuItem>,
}

impl MenuGroup {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn action(mut self, id: impl Into<String>) -> Self {
        self.children.push(MenuItem::Action(id.into()));
        self
    }

    pub fn actions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children
            .extend(ids.into_iter().map(|id| MenuItem::Action(id.into())));
        self
    }

    pub fn group(mut self, group: MenuGroup) -> Self {
        self.children.push(MenuItem::Group(group));
        self
    }

    pub fn separator(mut self) -> Self {
        self.children.push(MenuItem::Separator);
        self
    }

    /// Direct child group whose text is `text`.
    pub fn child_group_mut(&mut self, text: &str) -> Option<&mut MenuGroup> {
        self.children.iter_mut().find_map(|item| match item {
            MenuItem::Group(group) if group.text.as_deref() == Some(text) => Some(group),
            _ => None,
        })
    }
}

/// Actions indexed by id and alias, plus the main menu.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    actions: Vec<Action>,
    index: HashMap<String, usize>,
    main_menu: MenuGroup,
}

impl ActionCatalog {
    /// Build a catalog; ids and aliases must be unique across all actions.
    pub fn new(actions: Vec<Action>, main_menu: MenuGroup) -> Result<Self> {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, action) in actions.iter().enumerate() {
            for key in std::iter::once(&action.id).chain(action.aliases.iter()) {
                if index.insert(key.clone(), position).is_some() {
                    return Err(KeymapError::DuplicateAction(key.clone()));
                }
            }
        }
        Ok(Self {
            actions,
            index,
            main_menu,
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionLookup for ActionCatalog {
    fn resolve(&self, id: &str) -> Option<&Action> {
        self.index.get(id).and_then(|&position| self.actions.get(position))
    }

    fn main_menu(&self) -> &MenuGroup {
        &self.main_menu
    }
}

/// Canonical identity of `id`: the resolved action's id, or `id` itself when
/// the catalog does not know it.
pub fn canonical_id<'a>(actions: &'a dyn ActionLookup, id: &'a str) -> &'a str {
    actions.resolve(id).map(|action| action.id.as_str()).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ids_and_aliases() {
        let catalog = ActionCatalog::new(
            vec![Action::new("CloseContent").text("Close Tab").alias("CloseEditor")],
            MenuGroup::unnamed(),
        )
        .expect("catalog");
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
        assert_eq!(
            catalog.resolve("CloseEditor").map(|action| action.id.as_str()),
            Some("CloseContent")
        );
        assert_eq!(canonical_id(&catalog, "CloseEditor"), "CloseContent");
        assert_eq!(canonical_id(&catalog, "Unknown"), "Unknown");
        assert!(catalog.resolve("Unknown").is_none());
    }

    #[test]
    fn rejects_alias_clashing_with_id() {
        let err = ActionCatalog::new(
            vec![Action::new("Find"), Action::new("Search").alias("Find")],
            MenuGroup::unnamed(),
        )
        .unwrap_err();
        assert!(matches!(err, KeymapError::DuplicateAction(id) if id == "Find"));
    }

    #[test]
    fn child_group_lookup_is_by_text() {
        let mut menu = MenuGroup::unnamed()
            .group(MenuGroup::new("File").action("SaveAll"))
            .separator()
            .group(MenuGroup::new("Edit"));
        let edit = menu.child_group_mut("Edit").expect("edit group");
        edit.children.push(MenuItem::Action("Find".to_string()));
        assert!(menu.child_group_mut("Tools").is_none());
    }
}
