//! Human-readable descriptions of actions.

use crate::actions::{ActionLookup, MenuGroup, MenuItem, canonical_id};

/// The display line for an action plus the pieces it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub display_name: Option<String>,
    pub group_label: Option<String>,
    pub icon: Option<String>,
}

/// Describe `action_id`.
///
/// The line is `"{name}: {description} ({group})"`, dropping the pieces that
/// are missing. An action without a name shows its id with `$` markers
/// stripped. An id that does not resolve yields an empty description.
pub fn describe(action_id: &str, actions: &dyn ActionLookup) -> Description {
    let Some(action) = actions.resolve(action_id) else {
        return Description::default();
    };

    let name = non_blank(action.text.as_deref());
    let details = non_blank(action.description.as_deref());
    let group_label = group_label(action_id, actions);
    let suffix = group_label
        .as_deref()
        .map(|label| format!(" ({label})"))
        .unwrap_or_default();

    let text = match (name, details) {
        (None, _) => format!("{}{suffix}", action_id.replace('$', "")),
        (Some(name), None) => format!("{name}{suffix}"),
        (Some(name), Some(details)) => format!("{name}: {details}{suffix}"),
    };

    Description {
        text,
        display_name: name.map(str::to_string),
        group_label,
        icon: action.icon.clone(),
    }
}

/// Label of the nearest named menu group containing `action_id`.
///
/// Searches the main menu depth first. A blank group name defers to the
/// enclosing group's name. The first group directly containing the action
/// decides; if no label reaches it, the search resumes after that group.
pub fn group_label(action_id: &str, actions: &dyn ActionLookup) -> Option<String> {
    let target = canonical_id(actions, action_id);
    let root = actions.main_menu();
    find_label(root, target, non_blank(root.text.as_deref()), actions)
}

fn find_label(
    group: &MenuGroup,
    target: &str,
    inherited: Option<&str>,
    actions: &dyn ActionLookup,
) -> Option<String> {
    for item in &group.children {
        match item {
            MenuItem::Action(id) => {
                if canonical_id(actions, id) == target {
                    return inherited.map(str::to_string);
                }
            }
            MenuItem::Group(child) => {
                if let Some(id) = child.id.as_deref()
                    && canonical_id(actions, id) == target
                {
                    return inherited.map(str::to_string);
                }
                let label = non_blank(child.text.as_deref()).or(inherited);
                if let Some(found) = find_label(child, target, label, actions) {
                    return Some(found);
                }
            }
            MenuItem::Separator => {}
        }
    }
    None
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}
