use service_core::error::AppError;
use thiserror::Error;

/// Lookup and construction failures of the permission tree.
///
/// Unknown identifiers mean the caller and the loaded data disagree; they are
/// integration defects rather than user input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Permission section not found: {0}")]
    SectionNotFound(String),

    #[error("Permission section name is ambiguous, use its plugin key: {0}")]
    AmbiguousSection(String),

    #[error("Permission action not found: {0}")]
    ActionNotFound(String),

    #[error("Duplicate permission section: {0}")]
    DuplicateSection(String),

    #[error("Duplicate permission action: {0}")]
    DuplicateAction(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("No role loaded")]
    NotLoaded,

    #[error("Role not found: {0}")]
    RoleNotFound(u64),

    #[error("Admin API rejected the save: {0}")]
    SaveRejected(String),

    #[error("Admin API unauthorized")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Admin API returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to decode admin API payload: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Decode(err.to_string())
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Tree(e) => AppError::BadRequest(anyhow::Error::new(e)),
            EditorError::NotLoaded => AppError::InternalError(anyhow::anyhow!("No role loaded")),
            EditorError::RoleNotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Role {} not found", id))
            }
            EditorError::SaveRejected(msg) => AppError::Conflict(anyhow::anyhow!(msg)),
            EditorError::Unauthorized => {
                AppError::Unauthorized(anyhow::anyhow!("Admin API token rejected"))
            }
            EditorError::Network(e) => AppError::BadGateway(e.to_string()),
            EditorError::Upstream { status, message } => {
                AppError::BadGateway(format!("status {}: {}", status, message))
            }
            EditorError::Decode(msg) => AppError::BadGateway(msg),
            EditorError::Internal(e) => AppError::InternalError(e),
        }
    }
}
