//! HTTP client for the users-permissions admin API.
//!
//! Implements [`RoleStore`]: a load fetches the role and the route table in
//! parallel and merges them into permission sections; a save PUTs the role
//! with its full permission map.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use service_core::observability::WithTraceContext;
use std::time::Duration;
use tracing::instrument;

use crate::config::AdminApiConfig;
use crate::dtos::{
    permissions_to_wire, sections_from_wire, ApiErrorBody, RoleEnvelope, RoutesEnvelope,
    UpdateRoleRequest,
};
use crate::models::{PermissionSection, Role};
use crate::services::editor::{LoadedRole, RoleStore};
use crate::services::error::EditorError;

#[derive(Clone)]
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Secret<String>,
}

impl AdminApiClient {
    pub fn new(config: &AdminApiConfig) -> Result<Self, EditorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(base_url = %config.base_url, "Admin API client configured");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_role(&self, role_id: u64) -> Result<RoleEnvelope, EditorError> {
        let response = self
            .http
            .get(self.url(&format!("/users-permissions/roles/{}", role_id)))
            .bearer_auth(self.token.expose_secret())
            .with_trace_context()
            .send()
            .await?;

        let response = check_status(response, Some(role_id), false).await?;
        decode(response).await
    }

    async fn fetch_routes(&self) -> Result<RoutesEnvelope, EditorError> {
        let response = self
            .http
            .get(self.url("/users-permissions/routes"))
            .bearer_auth(self.token.expose_secret())
            .with_trace_context()
            .send()
            .await?;

        let response = check_status(response, None, false).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, EditorError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Map non-success responses onto editor errors. `saving` selects whether a
/// 4xx is a rejected save or an unexpected upstream reply.
async fn check_status(
    response: Response,
    role_id: Option<u64>,
    saving: bool,
) -> Result<Response, EditorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    tracing::warn!(status = status.as_u16(), message = %message, "Admin API request failed");

    Err(match (status, role_id) {
        (StatusCode::NOT_FOUND, Some(id)) => EditorError::RoleNotFound(id),
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => EditorError::Unauthorized,
        (s, _) if saving && s.is_client_error() => EditorError::SaveRejected(message),
        (s, _) => EditorError::Upstream {
            status: s.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl RoleStore for AdminApiClient {
    #[instrument(skip(self))]
    async fn load(&self, role_id: u64) -> Result<LoadedRole, EditorError> {
        let (role, routes) = tokio::try_join!(self.fetch_role(role_id), self.fetch_routes())?;

        let sections = sections_from_wire(&role.role.permissions, &routes.routes)?;
        tracing::debug!(
            role_id,
            sections = sections.len(),
            "Fetched role and routes"
        );

        Ok(LoadedRole {
            role: Role::from(&role.role),
            sections,
        })
    }

    #[instrument(skip(self, role, sections), fields(role_id = role.id))]
    async fn save(&self, role: &Role, sections: &[PermissionSection]) -> Result<(), EditorError> {
        let body = UpdateRoleRequest {
            name: &role.name,
            description: &role.description,
            permissions: permissions_to_wire(sections),
        };

        let response = self
            .http
            .put(self.url(&format!("/users-permissions/roles/{}", role.id)))
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .with_trace_context()
            .send()
            .await?;

        check_status(response, Some(role.id), true).await?;
        tracing::debug!("Role update accepted");
        Ok(())
    }
}

impl std::fmt::Debug for AdminApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
