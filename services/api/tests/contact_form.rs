mod support;

use anyhow::Result;
use api::config::PublicTeacherFilter;
use api::mailer::{ContactMessage, Mailer};
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use support::{app, app_with};
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<Option<String>> {
        self.sent.lock().await.push(message.clone());
        Ok(Some("msg_0001".to_string()))
    }
}

#[tokio::test]
async fn message_is_forwarded() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(PublicTeacherFilter::Male, Some(mailer.clone()));

    let response = app
        .send(
            "POST",
            "/api/contact",
            None,
            Some(json!({
                "name": "Sara",
                "email": "sara@example.com",
                "message": "When does the next Tajweed intake start?"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(response.body["id"], "msg_0001");

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "sara@example.com");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = app_with(
        PublicTeacherFilter::Male,
        Some(Arc::new(RecordingMailer::default())),
    );

    let response = app
        .send(
            "POST",
            "/api/contact",
            None,
            Some(json!({ "name": "Sara", "email": "sara@example.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing fields");
}

#[tokio::test]
async fn unconfigured_mailer_is_an_error() {
    let app = app();

    let response = app
        .send(
            "POST",
            "/api/contact",
            None,
            Some(json!({
                "name": "Sara",
                "email": "sara@example.com",
                "message": "Salaam"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Email service not configured");
}
