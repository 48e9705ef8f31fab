use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Roles that only describe something else on the page.
pub const STATIC_ROLES: &[&str] = &["text", "heading", "paragraph", "label"];

/// Roles the agent can act on.
pub const INTERACTIVE_ROLES: &[&str] = &[
    "textbox",
    "checkbox",
    "radio",
    "combobox",
    "listbox",
    "radiogroup",
    "link",
    "button",
    "slider",
];

/// Roles whose accessible name may carry a per-instance value after `": "`.
pub const INPUT_ROLES: &[&str] = &["textbox", "combobox", "searchbox", "slider", "spinbutton"];

/// Container roles whose trailing `option` children get folded into one line.
pub const OPTION_CONTAINER_ROLES: &[&str] = &["combobox", "listbox"];

pub fn is_static_role(role: &str) -> bool {
    STATIC_ROLES.contains(&role)
}

pub fn is_interactive_role(role: &str) -> bool {
    INTERACTIVE_ROLES.contains(&role)
}

pub fn is_input_role(role: &str) -> bool {
    INPUT_ROLES.contains(&role)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
}

/// One addressable node from an accessibility snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub role: String,
    /// Accessible name, empty when the node has none.
    #[serde(default)]
    pub name: String,
    /// Trailing text, `None` when absent or equal to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub locator: String,
    #[serde(default)]
    pub scope: Scope,
    /// Id of the enclosing element. A lookup relation, not ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>, role: impl Into<String>, name: impl Into<String>) -> Self {
        Element {
            id: id.into(),
            role: role.into(),
            name: name.into(),
            text: None,
            locator: String::new(),
            scope: Scope::Global,
            parent: None,
            states: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Name if present, otherwise trailing text.
    pub fn primary_text(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            self.text.as_deref().unwrap_or("")
        }
    }

    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    pub fn state(&self, key: &str) -> bool {
        self.states.get(key).copied().unwrap_or(false)
    }
}
