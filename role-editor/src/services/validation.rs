//! Role form validation.
//!
//! `name` is always required. `description` is required only when
//! configured; the role page has shipped both ways.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateLength;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    InvalidValue,
}

/// Field-level validation failure shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn invalid_value(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::InvalidValue,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::InvalidValue => write!(f, "{}: Invalid value", self.field),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub require_description: bool,
}

/// Validate the role form. An empty vector means the role may be saved.
pub fn validate_role(role: &Role, config: &ValidationConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !role.name.validate_length(Some(1u64), None, None) {
        errors.push(FieldError::invalid_value("name"));
    }

    if config.require_description && !role.description.validate_length(Some(1u64), None, None) {
        errors.push(FieldError::invalid_value("description"));
    }

    errors
}
