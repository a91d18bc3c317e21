//! Role editor session.
//!
//! Loads a role through a [`RoleStore`], keeps the draft and the permission
//! tree while the user edits, and saves only after local validation passes.
//! Collaborators are injected so tests can swap them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::instrument;

use crate::models::{PermissionSection, Role};
use crate::services::error::EditorError;
use crate::services::notifier::{Notification, Notifier};
use crate::services::tree::PermissionTree;
use crate::services::validation::{validate_role, FieldError, ValidationConfig};

/// A role together with its permission sections, as returned by a load.
#[derive(Debug, Clone)]
pub struct LoadedRole {
    pub role: Role,
    pub sections: Vec<PermissionSection>,
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn load(&self, role_id: u64) -> Result<LoadedRole, EditorError>;

    async fn save(&self, role: &Role, sections: &[PermissionSection]) -> Result<(), EditorError>;
}

/// Result of a submit that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Local validation failed; nothing was sent and nothing changed.
    Rejected(Vec<FieldError>),
}

/// Editable state of one loaded role.
#[derive(Debug, Clone)]
pub struct EditSession {
    saved: Role,
    draft: Role,
    pub tree: PermissionTree,
}

impl EditSession {
    pub fn new(loaded: LoadedRole) -> Result<Self, EditorError> {
        let tree = PermissionTree::new(loaded.sections)?;
        Ok(Self {
            saved: loaded.role.clone(),
            draft: loaded.role,
            tree,
        })
    }

    /// Role as last loaded or saved.
    pub fn saved(&self) -> &Role {
        &self.saved
    }

    /// Role as currently edited.
    pub fn draft(&self) -> &Role {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Whether the name or description differ from the saved role.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }
}

pub struct RoleEditor {
    store: Arc<dyn RoleStore>,
    notifier: Arc<dyn Notifier>,
    validation: ValidationConfig,
    session: Option<EditSession>,
}

impl RoleEditor {
    pub fn new(
        store: Arc<dyn RoleStore>,
        notifier: Arc<dyn Notifier>,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            validation,
            session: None,
        }
    }

    /// Fetch the role and start a fresh session. On failure any previous
    /// session is dropped so nothing operates on stale data.
    #[instrument(skip(self))]
    pub async fn load(&mut self, role_id: u64) -> Result<(), EditorError> {
        self.session = None;

        let loaded = self.store.load(role_id).await;
        let session = match loaded.and_then(EditSession::new) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load role");
                self.notifier
                    .notify(Notification::warning(format!("Could not load role: {}", e)));
                return Err(e);
            }
        };

        tracing::info!(
            role = %session.draft.name,
            sections = session.tree.sections().len(),
            "Role loaded"
        );
        self.session = Some(session);
        Ok(())
    }

    pub fn session(&self) -> Result<&EditSession, EditorError> {
        self.session.as_ref().ok_or(EditorError::NotLoaded)
    }

    pub fn session_mut(&mut self) -> Result<&mut EditSession, EditorError> {
        self.session.as_mut().ok_or(EditorError::NotLoaded)
    }

    /// Validate the draft and, if it passes, hand it to the store.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NotLoaded)?;

        let errors = validate_role(&session.draft, &self.validation);
        if !errors.is_empty() {
            tracing::info!(errors = errors.len(), "Role form rejected by validation");
            return Ok(SubmitOutcome::Rejected(errors));
        }

        if let Err(e) = self
            .store
            .save(&session.draft, session.tree.sections())
            .await
        {
            tracing::error!(error = %e, role_id = session.draft.id, "Failed to save role");
            self.notifier
                .notify(Notification::warning(format!("Could not save role: {}", e)));
            return Err(e);
        }

        session.saved = session.draft.clone();
        tracing::info!(role_id = session.saved.id, "Role saved");
        self.notifier.notify(Notification::success("Role edited"));
        Ok(SubmitOutcome::Saved)
    }
}

/// In-memory [`RoleStore`] keyed by role id. Saves overwrite the stored copy.
#[derive(Default)]
pub struct MockRoleStore {
    pub roles: Mutex<HashMap<u64, LoadedRole>>,
    pub save_calls: Mutex<usize>,
    pub fail_saves: bool,
}

impl MockRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(self, role: Role, sections: Vec<PermissionSection>) -> Self {
        if let Ok(mut roles) = self.roles.lock() {
            roles.insert(role.id, LoadedRole { role, sections });
        }
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn save_count(&self) -> usize {
        self.save_calls.lock().map(|count| *count).unwrap_or(0)
    }

    pub fn stored(&self, role_id: u64) -> Option<LoadedRole> {
        self.roles
            .lock()
            .ok()
            .and_then(|roles| roles.get(&role_id).cloned())
    }
}

#[async_trait]
impl RoleStore for MockRoleStore {
    async fn load(&self, role_id: u64) -> Result<LoadedRole, EditorError> {
        self.stored(role_id)
            .ok_or(EditorError::RoleNotFound(role_id))
    }

    async fn save(&self, role: &Role, sections: &[PermissionSection]) -> Result<(), EditorError> {
        *self
            .save_calls
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))? += 1;

        if self.fail_saves {
            return Err(EditorError::SaveRejected("mock store refuses saves".to_string()));
        }

        self.roles
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))?
            .insert(
                role.id,
                LoadedRole {
                    role: role.clone(),
                    sections: sections.to_vec(),
                },
            );
        Ok(())
    }
}
