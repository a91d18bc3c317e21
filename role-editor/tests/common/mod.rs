//! Test helper module for role-editor integration tests.
//!
//! Serves a fake users-permissions admin API from a wiremock server with an
//! "Authenticated" role and the `api::address` plugin.

#![allow(dead_code)]

use role_editor::config::AdminApiConfig;
use role_editor::services::{AdminApiClient, MockNotifier, RoleEditor, ValidationConfig};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-admin-token";
pub const ROLE_PATH: &str = "/admin/users-permissions/roles/1";
pub const ROUTES_PATH: &str = "/admin/users-permissions/routes";

pub fn role_fixture() -> Value {
    json!({
        "role": {
            "id": 1,
            "name": "Authenticated",
            "description": "Default role given to authenticated user.",
            "type": "authenticated",
            "permissions": {
                "api::address": {
                    "controllers": {
                        "address": {
                            "create": { "enabled": false, "policy": "" },
                            "find": { "enabled": false, "policy": "" },
                            "update": { "enabled": false, "policy": "" }
                        }
                    }
                }
            }
        }
    })
}

pub fn routes_fixture() -> Value {
    json!({
        "routes": {
            "api::address": [
                {
                    "method": "POST",
                    "path": "/addresses",
                    "handler": "address.create",
                    "config": { "policies": [] },
                    "info": { "apiName": "address", "type": "content-api" }
                },
                {
                    "method": "GET",
                    "path": "/addresses",
                    "handler": "address.find",
                    "config": { "policies": [] },
                    "info": { "apiName": "address", "type": "content-api" }
                }
            ]
        }
    })
}

/// Fake admin API with the role and routes mounted. Saves are not mounted;
/// each test mounts the PUT it expects.
pub struct TestAdmin {
    pub server: MockServer,
}

impl TestAdmin {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ROLE_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(role_fixture()))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(ROUTES_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(routes_fixture()))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn config(&self) -> AdminApiConfig {
        AdminApiConfig {
            base_url: format!("{}/admin", self.server.uri()),
            token: Secret::new(TEST_TOKEN.to_string()),
            timeout_seconds: 5,
        }
    }

    pub fn client(&self) -> AdminApiClient {
        AdminApiClient::new(&self.config()).expect("Failed to build admin client")
    }

    pub fn editor(&self, notifier: Arc<MockNotifier>) -> RoleEditor {
        RoleEditor::new(
            Arc::new(self.client()),
            notifier,
            ValidationConfig::default(),
        )
    }

    /// Expect `times` PUTs to the role and answer them with `ok`.
    pub async fn expect_save(&self, times: u64) {
        Mock::given(method("PUT"))
            .and(path(ROLE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every PUT the server received.
    pub async fn saved_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.to_string() == "PUT")
            .map(|request| request.body_json::<Value>().expect("PUT body is JSON"))
            .collect()
    }
}
