//! Integration tests for editing a role's name and description against the
//! admin API.

mod common;

use common::{TestAdmin, ROLE_PATH};
use role_editor::services::{
    EditorError, FieldError, MockNotifier, Notification, NotificationKind, RoleEditor, RoleStore,
    SubmitOutcome, ValidationConfig,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn loads_role_details() {
    let admin = TestAdmin::spawn().await;
    let mut editor = admin.editor(Arc::new(MockNotifier::new()));

    editor.load(1).await.unwrap();

    let session = editor.session().unwrap();
    assert_eq!(session.draft().id, 1);
    assert_eq!(session.draft().name, "Authenticated");
    assert_eq!(
        session.draft().description,
        "Default role given to authenticated user."
    );
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn empty_name_shows_invalid_value_and_never_saves() {
    let admin = TestAdmin::spawn().await;
    admin.expect_save(0).await;
    let notifier = Arc::new(MockNotifier::new());
    let mut editor = admin.editor(notifier.clone());
    editor.load(1).await.unwrap();

    let session = editor.session_mut().unwrap();
    session.set_name("");
    session.set_description("");

    let outcome = editor.submit().await.unwrap();

    match outcome {
        SubmitOutcome::Rejected(errors) => {
            assert!(!errors.is_empty());
            assert!(errors.contains(&FieldError::invalid_value("name")));
            assert!(errors
                .iter()
                .all(|e| e.to_string().ends_with("Invalid value")));
        }
        SubmitOutcome::Saved => panic!("empty name must not be saved"),
    }
    assert_eq!(editor.session().unwrap().saved().name, "Authenticated");
    assert!(notifier.sent().is_empty());
    assert!(admin.saved_bodies().await.is_empty());
}

#[tokio::test]
async fn required_description_is_reported_too() {
    let admin = TestAdmin::spawn().await;
    admin.expect_save(0).await;
    let mut editor = RoleEditor::new(
        Arc::new(admin.client()),
        Arc::new(MockNotifier::new()),
        ValidationConfig {
            require_description: true,
        },
    );
    editor.load(1).await.unwrap();

    let session = editor.session_mut().unwrap();
    session.set_name("");
    session.set_description("");

    assert_eq!(
        editor.submit().await.unwrap(),
        SubmitOutcome::Rejected(vec![
            FieldError::invalid_value("name"),
            FieldError::invalid_value("description"),
        ])
    );
}

#[tokio::test]
async fn valid_edit_is_saved_with_permissions() {
    let admin = TestAdmin::spawn().await;
    admin.expect_save(1).await;
    let notifier = Arc::new(MockNotifier::new());
    let mut editor = admin.editor(notifier.clone());
    editor.load(1).await.unwrap();

    let session = editor.session_mut().unwrap();
    session.set_name("Members");
    session.set_description("Signed-in members");

    assert_eq!(editor.submit().await.unwrap(), SubmitOutcome::Saved);

    let bodies = admin.saved_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], "Members");
    assert_eq!(bodies[0]["description"], "Signed-in members");
    assert_eq!(
        bodies[0]["permissions"]["api::address"]["controllers"]["address"]["create"],
        json!({ "enabled": false, "policy": "" })
    );

    let session = editor.session().unwrap();
    assert_eq!(session.saved().name, "Members");
    assert!(!session.is_dirty());
    assert_eq!(notifier.sent(), vec![Notification::success("Role edited")]);
}

#[tokio::test]
async fn rejected_save_surfaces_server_message() {
    let admin = TestAdmin::spawn().await;
    Mock::given(method("PUT"))
        .and(path(ROLE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "data": null,
            "error": { "status": 400, "name": "ApplicationError", "message": "Name already taken" }
        })))
        .expect(1)
        .mount(&admin.server)
        .await;
    let notifier = Arc::new(MockNotifier::new());
    let mut editor = admin.editor(notifier.clone());
    editor.load(1).await.unwrap();
    editor.session_mut().unwrap().set_name("Public");

    let result = editor.submit().await;

    match result {
        Err(EditorError::SaveRejected(message)) => assert_eq!(message, "Name already taken"),
        other => panic!("expected SaveRejected, got {:?}", other),
    }
    let session = editor.session().unwrap();
    assert_eq!(session.saved().name, "Authenticated");
    assert!(session.is_dirty());
    assert_eq!(notifier.sent()[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn unknown_role_is_not_found() {
    let admin = TestAdmin::spawn().await;
    Mock::given(method("GET"))
        .and(path("/admin/users-permissions/roles/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": null,
            "error": { "status": 404, "name": "NotFoundError", "message": "Not Found" }
        })))
        .mount(&admin.server)
        .await;
    let notifier = Arc::new(MockNotifier::new());
    let mut editor = admin.editor(notifier.clone());

    let result = editor.load(99).await;

    assert!(matches!(result, Err(EditorError::RoleNotFound(99))));
    assert!(matches!(editor.session(), Err(EditorError::NotLoaded)));
    assert_eq!(notifier.sent()[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let admin = TestAdmin::spawn().await;
    let mut config = admin.config();
    config.token = secrecy::Secret::new("wrong".to_string());
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&admin.server)
        .await;

    let client = role_editor::services::AdminApiClient::new(&config).unwrap();

    assert!(matches!(client.load(1).await, Err(EditorError::Unauthorized)));
}

#[tokio::test]
async fn malformed_role_payload_is_decode_error() {
    let admin = TestAdmin::spawn().await;
    Mock::given(method("GET"))
        .and(path("/admin/users-permissions/roles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&admin.server)
        .await;

    let result = admin.client().load(5).await;

    assert!(matches!(result, Err(EditorError::Decode(_))));
}
