//! Authentication service routes

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::Utc;
use common::session::{SESSION_COOKIE, SessionState, session_cookie, session_cookie_removal};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::authenticator::AuthenticationError;
use crate::error::{AuthError, AuthResult};
use crate::models::AdminSummary;
use crate::provisioning::provision_admin;
use crate::state::AppState;

/// Header carrying the provisioning secret
pub const PROVISIONING_HEADER: &str = "x-provisioning-secret";

/// Request for admin login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request for admin provisioning
#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/session", get(session))
        .route("/api/admin/create", post(create_admin))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Admin login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> AuthResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (
        non_empty(payload.username.as_ref()),
        non_empty(payload.password.as_ref()),
    ) else {
        return Err(AuthError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    info!("Login attempt for admin: {}", username);

    let limiter_key = username.to_lowercase();
    if !state.rate_limiter.try_reserve(&limiter_key).await {
        warn!("Login refused for {}: too many attempts", username);
        return Err(AuthError::TooManyAttempts);
    }

    let session = match state.authenticator.authenticate(username, password).await {
        Ok(session) => session,
        Err(e) => {
            if matches!(e, AuthenticationError::InvalidCredentials) {
                state.rate_limiter.record_failure(&limiter_key).await;
            } else {
                state.rate_limiter.release(&limiter_key).await;
            }
            return Err(e.into());
        }
    };
    state.rate_limiter.reset(&limiter_key).await;

    let cookie = session_cookie(
        session.token,
        state.codec.ttl(),
        state.settings.secure_cookies,
    );

    Ok((
        jar.add(cookie),
        Json(json!({
            "success": true,
            "admin": AdminSummary::from(&session.admin),
        })),
    ))
}

/// Admin logout endpoint
///
/// Always succeeds; a decodable token is revoked for the rest of its lifetime.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token = cookie.value();
        if let Ok(descriptor) = state.codec.decode(token) {
            let remaining = state.codec.remaining_lifetime(&descriptor, Utc::now());
            match state.revocations.revoke(token, remaining).await {
                Ok(()) => info!("Admin {} logged out", descriptor.username),
                Err(e) => error!("Failed to revoke session for {}: {}", descriptor.username, e),
            }
        }
    }

    (
        jar.remove(session_cookie_removal()),
        Json(json!({
            "success": true,
            "message": "Logged out successfully",
        })),
    )
}

/// Current session endpoint
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, (CookieJar, AuthError)> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let classified = SessionState::classify(token.as_deref(), &state.codec, Utc::now());

    let descriptor = match classified {
        SessionState::Valid(descriptor) => descriptor,
        other => {
            info!("Session lookup rejected: {}", other.reason());
            let jar = if other.clears_cookie() {
                jar.remove(session_cookie_removal())
            } else {
                jar
            };
            return Err((jar, AuthError::Unauthorized));
        }
    };

    let token = token.unwrap_or_default();
    match state.revocations.is_revoked(&token).await {
        Ok(false) => {}
        Ok(true) => {
            info!("Session lookup rejected: revoked session token");
            return Err((jar.remove(session_cookie_removal()), AuthError::Unauthorized));
        }
        Err(e) => {
            error!("Failed to consult revocation list: {}", e);
            return Err((jar, AuthError::InternalServerError));
        }
    }

    Ok(Json(json!({
        "success": true,
        "admin": descriptor,
    })))
}

/// Admin provisioning endpoint, guarded by the provisioning secret
pub async fn create_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAdminRequest>, AuthError>,
) -> AuthResult<impl IntoResponse> {
    let Some(expected) = state.settings.provisioning_secret.as_deref() else {
        warn!("Provisioning attempt while provisioning is disabled");
        return Err(AuthError::Forbidden("Admin provisioning is disabled"));
    };

    let presented = headers
        .get(PROVISIONING_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected) {
        warn!("Provisioning attempt with a wrong secret");
        return Err(AuthError::Forbidden("Invalid provisioning secret"));
    }

    let username = payload.username.as_deref().unwrap_or_default().trim();
    let email = payload.email.as_deref().unwrap_or_default().trim();
    let password = payload.password.as_deref().unwrap_or_default();

    let admin = provision_admin(state.credentials.as_ref(), username, email, password).await?;

    Ok(Json(json!({
        "success": true,
        "admin": AdminSummary::from(&admin),
    })))
}
