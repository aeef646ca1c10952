//! Public contact form

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use common::validation::validate_email;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::mailer::ContactMessage;
use crate::models::optional_text;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

pub async fn send_contact(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ContactRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let (Some(name), Some(email), Some(message)) = (
        optional_text(request.name.as_ref()),
        optional_text(request.email.as_ref()),
        optional_text(request.message.as_ref()),
    ) else {
        return Err(ApiError::Validation("Missing fields".to_string()));
    };
    validate_email(&email).map_err(ApiError::Validation)?;

    let Some(mailer) = state.mailer.as_ref() else {
        warn!("Contact message dropped: email service not configured");
        return Err(ApiError::Unavailable("Email service not configured"));
    };

    let id = mailer
        .send_contact(&ContactMessage {
            name,
            email,
            message,
        })
        .await
        .map_err(|e| {
            error!("Failed to forward contact message: {:#}", e);
            ApiError::InternalServerError
        })?;

    info!("Contact message forwarded");
    Ok(Json(json!({ "ok": true, "id": id })))
}
