//! Permission model - sections of togglable actions, optionally bound to an
//! HTTP route.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method and path a permission action governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundRoute {
    pub method: String,
    pub path: String,
}

impl BoundRoute {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            path: path.into(),
        }
    }
}

impl fmt::Display for BoundRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A single togglable capability.
///
/// `controller` and `action` are the names the admin API nests the action
/// under; `policy` is stored verbatim so a save does not drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionAction {
    pub identifier: String,
    pub controller: String,
    pub action: String,
    pub enabled: bool,
    pub policy: String,
    pub bound_route: Option<BoundRoute>,
}

impl PermissionAction {
    /// Disabled action with no controller and no route.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            action: identifier.clone(),
            identifier,
            controller: String::new(),
            enabled: false,
            policy: String::new(),
            bound_route: None,
        }
    }

    /// Action nested under `plugin` / `controller`, identified as
    /// `<plugin>.<controller>.<action>` (e.g. `api::address.address.create`).
    pub fn for_controller(plugin: &str, controller: &str, action: &str) -> Self {
        Self {
            identifier: format!("{}.{}.{}", plugin, controller, action),
            controller: controller.to_string(),
            action: action.to_string(),
            enabled: false,
            policy: String::new(),
            bound_route: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = policy.into();
        self
    }

    pub fn with_route(mut self, route: BoundRoute) -> Self {
        self.bound_route = Some(route);
        self
    }

    /// `controller.action`, the suffix route handlers are matched on.
    pub fn handler(&self) -> String {
        if self.controller.is_empty() {
            self.action.clone()
        } else {
            format!("{}.{}", self.controller, self.action)
        }
    }
}

/// One collapsible group of actions, usually one per API or plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSection {
    pub name: String,
    pub plugin: String,
    pub description: String,
    pub actions: Vec<PermissionAction>,
}

impl PermissionSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin: String::new(),
            description: String::new(),
            actions: Vec::new(),
        }
    }

    /// Section for a plugin key such as `api::address`, named and described
    /// the way the role page shows it.
    pub fn for_plugin(plugin: &str) -> Self {
        Self {
            name: section_display_name(plugin),
            plugin: plugin.to_string(),
            description: format!("Define all allowed actions for the {} plugin.", plugin),
            actions: Vec::new(),
        }
    }

    /// Identifier the tree looks the section up by: the plugin key when the
    /// section came from a plugin, else its name.
    pub fn key(&self) -> &str {
        if self.plugin.is_empty() {
            &self.name
        } else {
            &self.plugin
        }
    }

    pub fn with_action(mut self, action: PermissionAction) -> Self {
        self.actions.push(action);
        self
    }

    /// "Select all" aggregate. Vacuously true for an empty section.
    pub fn all_enabled(&self) -> bool {
        self.actions.iter().all(|a| a.enabled)
    }
}

/// `api::address` -> `Address`, `plugin::users-permissions` -> `Users-permissions`.
pub fn section_display_name(plugin: &str) -> String {
    let short = plugin.rsplit("::").next().unwrap_or(plugin);
    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
