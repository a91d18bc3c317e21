//! Wire shapes of the users-permissions admin API and their mapping to the
//! permission tree.
//!
//! Permissions are nested `plugin -> controllers -> controller -> action`.
//! Maps are kept as `serde_json::Map` (insertion ordered) so the tree shows
//! sections and actions in the order the server sent them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{BoundRoute, PermissionAction, PermissionSection, Role};
use crate::services::error::EditorError;

#[derive(Debug, Deserialize)]
pub struct RoleEnvelope {
    pub role: RoleDto,
}

#[derive(Debug, Deserialize)]
pub struct RoleDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionPermissionDto {
    pub enabled: bool,
    #[serde(default)]
    pub policy: String,
}

#[derive(Debug, Deserialize)]
pub struct RoutesEnvelope {
    #[serde(default)]
    pub routes: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub handler: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateRoleRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub permissions: Map<String, Value>,
}

/// Error body the admin API returns on 4xx.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl From<&RoleDto> for Role {
    fn from(dto: &RoleDto) -> Self {
        Role::new(
            dto.id,
            dto.name.clone(),
            dto.description.clone().unwrap_or_default(),
        )
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, EditorError> {
    value
        .as_object()
        .ok_or_else(|| EditorError::Decode(format!("{} is not an object", what)))
}

/// Build sections from the role's permission map, binding each action to the
/// route whose handler ends in `controller.action`.
pub fn sections_from_wire(
    permissions: &Map<String, Value>,
    routes: &Map<String, Value>,
) -> Result<Vec<PermissionSection>, EditorError> {
    let mut sections = Vec::with_capacity(permissions.len());

    for (plugin, plugin_value) in permissions {
        let plugin_routes: Vec<RouteDto> = match routes.get(plugin) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };

        let controllers = match as_object(plugin_value, plugin)?.get("controllers") {
            Some(value) => as_object(value, "controllers")?,
            None => continue,
        };

        let mut section = PermissionSection::for_plugin(plugin);
        for (controller, actions) in controllers {
            for (action, permission) in as_object(actions, controller)? {
                let permission: ActionPermissionDto = serde_json::from_value(permission.clone())?;
                let mut entry = PermissionAction::for_controller(plugin, controller, action)
                    .with_enabled(permission.enabled)
                    .with_policy(permission.policy);
                if let Some(route) = find_route(&plugin_routes, controller, action) {
                    entry = entry.with_route(BoundRoute::new(&route.method, &route.path));
                }
                section.actions.push(entry);
            }
        }
        sections.push(section);
    }

    Ok(sections)
}

fn find_route<'a>(routes: &'a [RouteDto], controller: &str, action: &str) -> Option<&'a RouteDto> {
    routes.iter().find(|route| {
        let mut parts = route.handler.rsplit('.');
        let route_action = parts.next();
        let route_controller = parts.next();
        route_action == Some(action) && route_controller == Some(controller)
    })
}

/// Inverse of [`sections_from_wire`]: the nested permission map for a save.
pub fn permissions_to_wire(sections: &[PermissionSection]) -> Map<String, Value> {
    let mut permissions = Map::new();

    for section in sections {
        let key = if section.plugin.is_empty() {
            section.name.clone()
        } else {
            section.plugin.clone()
        };

        let mut controllers = Map::new();
        for action in &section.actions {
            let entry = controllers
                .entry(action.controller.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(actions) = entry {
                actions.insert(
                    action.action.clone(),
                    serde_json::json!({
                        "enabled": action.enabled,
                        "policy": action.policy,
                    }),
                );
            }
        }

        let mut plugin = Map::new();
        plugin.insert("controllers".to_string(), Value::Object(controllers));
        permissions.insert(key, Value::Object(plugin));
    }

    permissions
}
