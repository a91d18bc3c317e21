use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

use crate::services::validation::ValidationConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub service: core_config::Config,
    pub admin: AdminApiConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminApiConfig {
    /// Admin API root, e.g. `http://localhost:1337/admin`.
    pub base_url: String,
    pub token: Secret<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

impl EditorConfig {
    /// Load from `configuration.{toml,yaml,json}` and `APP__*` variables.
    pub fn load() -> Result<Self, AppError> {
        Self::from_settings(core_config::settings("configuration")?)
    }

    pub fn from_settings(settings: config::Config) -> Result<Self, AppError> {
        let config: EditorConfig = settings.try_deserialize()?;

        if config.admin.base_url.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "admin.base_url must not be empty"
            )));
        }

        Ok(config)
    }
}
