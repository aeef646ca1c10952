//! Admin session gate
//!
//! Admits a request only when it carries a decodable, unexpired, unrevoked
//! `admin-token` cookie. API routes are refused with a 401 body, page routes
//! are redirected to the login page. Malformed, expired and revoked cookies
//! are cleared on the way out.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use common::session::{SESSION_COOKIE, SessionDescriptor, SessionState, session_cookie_removal};
use tracing::{error, info};

use crate::{error::ApiError, state::AppState};

/// Where rejected page requests are sent
pub const LOGIN_PAGE: &str = "/admin/login";

enum Verdict {
    Admit(SessionDescriptor),
    Reject { clear_cookie: bool },
    Fault,
}

async fn inspect(state: &AppState, jar: &CookieJar) -> Verdict {
    let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());

    let descriptor = match SessionState::classify(token, &state.codec, Utc::now()) {
        SessionState::Valid(descriptor) => descriptor,
        other => {
            info!("Gate rejected request: {}", other.reason());
            return Verdict::Reject {
                clear_cookie: other.clears_cookie(),
            };
        }
    };

    match state.revocations.is_revoked(token.unwrap_or_default()).await {
        Ok(false) => Verdict::Admit(descriptor),
        Ok(true) => {
            info!("Gate rejected request: revoked session token");
            Verdict::Reject { clear_cookie: true }
        }
        Err(e) => {
            error!("Failed to consult revocation list: {}", e);
            Verdict::Fault
        }
    }
}

fn outgoing_jar(jar: CookieJar, clear_cookie: bool) -> CookieJar {
    if clear_cookie {
        jar.remove(session_cookie_removal())
    } else {
        jar
    }
}

/// Gate for JSON API routes
pub async fn require_admin_api(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match inspect(&state, &jar).await {
        Verdict::Admit(descriptor) => {
            req.extensions_mut().insert(descriptor);
            next.run(req).await
        }
        Verdict::Reject { clear_cookie } => {
            (outgoing_jar(jar, clear_cookie), ApiError::Unauthorized).into_response()
        }
        Verdict::Fault => ApiError::InternalServerError.into_response(),
    }
}

/// Gate for admin pages
pub async fn require_admin_page(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match inspect(&state, &jar).await {
        Verdict::Admit(descriptor) => {
            req.extensions_mut().insert(descriptor);
            next.run(req).await
        }
        Verdict::Reject { clear_cookie } => {
            (outgoing_jar(jar, clear_cookie), Redirect::to(LOGIN_PAGE)).into_response()
        }
        Verdict::Fault => ApiError::InternalServerError.into_response(),
    }
}
