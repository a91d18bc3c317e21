//! Role model - the editable name/description pair of a users-permissions role.

use serde::{Deserialize, Serialize};

/// Role entity as edited on the role page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Role {
    /// Create a new role.
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}
