//! Custom error types for the authentication service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::authenticator::AuthenticationError;
use crate::provisioning::ProvisionError;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: Admin access required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Too many login attempts, try again later")]
    TooManyAttempts,

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Conflict(_) => StatusCode::CONFLICT,
            AuthError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(error: AuthenticationError) -> Self {
        match error {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            other => {
                error!("Admin login error: {}", other);
                AuthError::InternalServerError
            }
        }
    }
}

impl From<ProvisionError> for AuthError {
    fn from(error: ProvisionError) -> Self {
        match error {
            ProvisionError::Invalid(message) => AuthError::BadRequest(message),
            ProvisionError::Conflict(message) => AuthError::Conflict(message),
            other => {
                error!("Admin provisioning error: {}", other);
                AuthError::InternalServerError
            }
        }
    }
}

/// Type alias for authentication service results
pub type AuthResult<T> = Result<T, AuthError>;
