//! Teacher endpoints

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::parse_record_id;
use crate::error::{ApiError, ApiResult};
use crate::models::TeacherInput;
use crate::repositories::TEACHER_EMAIL_INDEX;
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "Teacher with this email already exists";
const NOT_FOUND: &str = "Teacher not found";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherRequest {
    pub teacher_id: Option<String>,
    #[serde(flatten)]
    pub teacher: TeacherInput,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTeacherRequest {
    pub teacher_id: Option<String>,
}

/// Every teacher, regardless of the public filter
pub async fn list_teachers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let teachers = state.teachers.list(None).await?;
    Ok(Json(json!({ "success": true, "teachers": teachers })))
}

/// Teachers shown on the public site
pub async fn public_teachers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let gender = state.settings.public_teacher_gender.gender();
    let teachers = state.teachers.list(gender).await?;
    Ok(Json(json!({ "success": true, "teachers": teachers })))
}

pub async fn add_teacher(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<TeacherInput>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let fields = input.validate().map_err(ApiError::Validation)?;

    let teacher = state
        .teachers
        .insert(&fields)
        .await
        .map_err(|e| ApiError::conflict_on(e, TEACHER_EMAIL_INDEX, DUPLICATE_EMAIL))?;

    info!("Created teacher {} ({})", teacher.email, teacher.id);
    Ok(Json(json!({ "success": true, "teacher": teacher })))
}

pub async fn update_teacher(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateTeacherRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_record_id(request.teacher_id.as_deref(), "Teacher")?;
    let fields = request.teacher.validate().map_err(ApiError::Validation)?;

    let teacher = state
        .teachers
        .update(id, &fields)
        .await
        .map_err(|e| ApiError::conflict_on(e, TEACHER_EMAIL_INDEX, DUPLICATE_EMAIL))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!("Updated teacher {} ({})", teacher.email, teacher.id);
    Ok(Json(json!({ "success": true, "teacher": teacher })))
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<DeleteTeacherRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_record_id(request.teacher_id.as_deref(), "Teacher")?;

    let teacher = state
        .teachers
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!("Deleted teacher {} ({})", teacher.email, teacher.id);
    Ok(Json(json!({
        "success": true,
        "message": "Teacher deleted successfully",
        "deletedTeacher": {
            "_id": teacher.id,
            "name": teacher.name,
            "email": teacher.email,
        },
    })))
}
