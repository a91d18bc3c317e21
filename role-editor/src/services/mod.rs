//! Services layer for the role editor.
//!
//! The permission tree and validation are pure; the editor coordinates them
//! with the injected store and notifier.

mod admin_client;
pub mod editor;
pub mod error;
pub mod notifier;
pub mod tree;
pub mod validation;

pub use admin_client::AdminApiClient;
pub use editor::{EditSession, LoadedRole, MockRoleStore, RoleEditor, RoleStore, SubmitOutcome};
pub use error::{EditorError, TreeError};
pub use notifier::{MockNotifier, Notification, NotificationKind, Notifier, TracingNotifier};
pub use tree::PermissionTree;
pub use validation::{validate_role, FieldError, FieldErrorKind, ValidationConfig};
