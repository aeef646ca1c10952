mod support;

use axum::http::{StatusCode, header};
use chrono::Duration;
use common::revocation::RevocationList;
use common::session::SessionCodec;
use support::{app, cookie_for, token_issued_ago};

const UNAUTHORIZED: &str = "Unauthorized: Admin access required";

#[tokio::test]
async fn missing_cookie_is_refused_without_clearing() {
    let app = app();

    let response = app.send("GET", "/api/courses/list", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], UNAUTHORIZED);
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn malformed_cookies_are_refused_and_cleared() {
    let app = app();
    let unsigned = "eyJ1c2VybmFtZSI6InJlZ2lzdHJhciIsInJvbGUiOiJhZG1pbiJ9";
    let valid = app.admin_cookie();
    let truncated = &valid[..valid.len() - 10];

    for cookie in [cookie_for(unsigned), cookie_for("not.a.jwt"), truncated.to_string()] {
        let response = app.send("GET", "/api/courses/list", Some(&cookie), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", cookie);
        assert!(response.clears_session(), "{}", cookie);
    }
}

#[tokio::test]
async fn token_signed_with_another_secret_is_refused() {
    let app = app();
    let foreign = SessionCodec::new(
        b"some-other-service-secret-0123456789abcdef",
        Duration::hours(24),
    )
    .unwrap();

    let cookie = cookie_for(&token_issued_ago(&foreign, Duration::zero()));
    let response = app.send("GET", "/api/teachers/list", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.clears_session());
}

#[tokio::test]
async fn expired_session_is_refused_and_cleared() {
    let app = app();

    let cookie = cookie_for(&token_issued_ago(&app.codec, Duration::hours(25)));
    let response = app.send("GET", "/api/courses/list", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], UNAUTHORIZED);
    assert!(response.clears_session());
}

#[tokio::test]
async fn session_just_inside_the_window_is_admitted() {
    let app = app();

    let cookie = cookie_for(&token_issued_ago(&app.codec, Duration::hours(23)));
    let response = app.send("GET", "/api/courses/list", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn revoked_session_is_refused_and_cleared() {
    let app = app();
    let token = token_issued_ago(&app.codec, Duration::minutes(5));
    app.revocations.revoke(&token, 3600).await.unwrap();

    let response = app
        .send("GET", "/api/courses/list", Some(&cookie_for(&token)), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.clears_session());
}

#[tokio::test]
async fn dashboard_redirects_to_login_without_a_session() {
    let app = app();

    let response = app.send("GET", "/admin/dashboard", None, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], "/admin/login");

    let cookie = cookie_for(&token_issued_ago(&app.codec, Duration::hours(30)));
    let response = app.send("GET", "/admin/dashboard", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.clears_session());
}

#[tokio::test]
async fn dashboard_summarises_the_catalogue() {
    let app = app();
    app.admin(
        "POST",
        "/api/courses/add",
        Some(serde_json::json!({
            "title": "Seerah",
            "description": "Life of the Prophet",
            "instructor": "Sheikh Yusuf",
            "level": "Intermediate",
            "duration": "6 weeks"
        })),
    )
    .await;

    let response = app.admin("GET", "/admin/dashboard", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["admin"]["username"], "registrar");
    assert_eq!(response.body["admin"]["role"], "admin");
    assert_eq!(response.body["courses"], 1);
    assert_eq!(response.body["teachers"], 0);
}

#[tokio::test]
async fn public_routes_need_no_session() {
    let app = app();

    for uri in ["/health", "/api/courses/public", "/api/teachers/public"] {
        let response = app.send("GET", uri, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
    }
}
