#![allow(dead_code)]

use api::config::{ApiSettings, DEFAULT_CONTACT_SENDER, PublicTeacherFilter};
use api::mailer::Mailer;
use api::repositories::{MemoryCourseStore, MemoryTeacherStore};
use api::{AppState, create_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::Duration;
use common::database::StorageBackend;
use common::revocation::MemoryRevocationList;
use common::session::{AdminRole, SESSION_COOKIE, SessionCodec, SessionDescriptor};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "api-integration-test-secret-0123456789";

pub struct TestApp {
    pub router: Router,
    pub codec: SessionCodec,
    pub revocations: Arc<MemoryRevocationList>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn clears_session(&self) -> bool {
        self.set_cookie().is_some_and(|cookie| {
            cookie.starts_with(&format!("{}=", SESSION_COOKIE)) && cookie.contains("Max-Age=0")
        })
    }
}

pub fn settings(public_teacher_gender: PublicTeacherFilter) -> ApiSettings {
    ApiSettings {
        bind_address: "127.0.0.1:0".to_string(),
        session_secret: SECRET.to_string(),
        session_ttl_hours: 24,
        secure_cookies: false,
        storage: StorageBackend::Memory,
        public_teacher_gender,
        resend_api_key: None,
        contact_recipient: None,
        contact_sender: DEFAULT_CONTACT_SENDER.to_string(),
    }
}

pub fn app_with(
    public_teacher_gender: PublicTeacherFilter,
    mailer: Option<Arc<dyn Mailer>>,
) -> TestApp {
    let settings = settings(public_teacher_gender);
    let codec = settings.session_codec().unwrap();
    let revocations = Arc::new(MemoryRevocationList::new());

    let state = AppState {
        courses: Arc::new(MemoryCourseStore::new()),
        teachers: Arc::new(MemoryTeacherStore::new()),
        codec: codec.clone(),
        revocations: revocations.clone(),
        mailer,
        settings: Arc::new(settings),
    };

    TestApp {
        router: create_router(state),
        codec,
        revocations,
    }
}

pub fn app() -> TestApp {
    app_with(PublicTeacherFilter::Male, None)
}

pub fn descriptor() -> SessionDescriptor {
    SessionDescriptor::issue(Uuid::new_v4(), "registrar", AdminRole::Admin)
}

pub fn token_issued_ago(codec: &SessionCodec, age: Duration) -> String {
    let mut descriptor = descriptor();
    descriptor.issued_at -= age;
    codec.encode(&descriptor).unwrap()
}

pub fn cookie_for(token: &str) -> String {
    format!("{}={}", SESSION_COOKIE, token)
}

impl TestApp {
    pub fn admin_cookie(&self) -> String {
        cookie_for(&self.codec.encode(&descriptor()).unwrap())
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Same as `send` with a fresh admin session cookie
    pub async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let cookie = self.admin_cookie();
        self.send(method, uri, Some(&cookie), body).await
    }
}
