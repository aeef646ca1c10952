//! Admin dashboard summary

use axum::{Extension, Json, extract::State, response::IntoResponse};
use common::session::SessionDescriptor;
use serde_json::json;

use crate::error::ApiResult;
use crate::state::AppState;

/// Record counts for the signed-in administrator's landing page
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<SessionDescriptor>,
) -> ApiResult<impl IntoResponse> {
    let courses = state.courses.count().await?;
    let teachers = state.teachers.count().await?;

    Ok(Json(json!({
        "success": true,
        "admin": admin,
        "courses": courses,
        "teachers": teachers,
    })))
}
