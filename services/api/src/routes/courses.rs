//! Course endpoints

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::parse_record_id;
use crate::error::{ApiError, ApiResult};
use crate::models::{CourseInput, InterestAction};
use crate::repositories::COURSE_TITLE_INDEX;
use crate::state::AppState;

const DUPLICATE_TITLE: &str = "Course with this title already exists";
const NOT_FOUND: &str = "Course not found";

/// Longest accepted interest client key
const MAX_CLIENT_ID_LEN: usize = 128;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub course_id: Option<String>,
    #[serde(flatten)]
    pub course: CourseInput,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCourseRequest {
    pub course_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    pub course_id: Option<String>,
    pub action: Option<String>,
    pub client_id: Option<String>,
}

/// All courses for the admin portal
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let courses = state.courses.list().await?;
    Ok(Json(json!({ "success": true, "courses": courses })))
}

/// All courses for the public site
pub async fn public_courses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let courses = state.courses.list().await?;
    Ok(Json(json!({ "success": true, "courses": courses })))
}

pub async fn add_course(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<CourseInput>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let fields = input.validate().map_err(ApiError::Validation)?;

    let course = state
        .courses
        .insert(&fields)
        .await
        .map_err(|e| ApiError::conflict_on(e, COURSE_TITLE_INDEX, DUPLICATE_TITLE))?;

    info!("Created course {} ({})", course.title, course.id);
    Ok(Json(json!({ "success": true, "course": course })))
}

pub async fn update_course(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateCourseRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_record_id(request.course_id.as_deref(), "Course")?;
    let fields = request.course.validate().map_err(ApiError::Validation)?;

    let course = state
        .courses
        .update(id, &fields)
        .await
        .map_err(|e| ApiError::conflict_on(e, COURSE_TITLE_INDEX, DUPLICATE_TITLE))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!("Updated course {} ({})", course.title, course.id);
    Ok(Json(json!({ "success": true, "course": course })))
}

pub async fn delete_course(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<DeleteCourseRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_record_id(request.course_id.as_deref(), "Course")?;

    let course = state
        .courses
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!("Deleted course {} ({})", course.title, course.id);
    Ok(Json(json!({
        "success": true,
        "message": "Course deleted successfully",
        "deletedCourse": {
            "_id": course.id,
            "title": course.title,
            "instructor": course.instructor,
        },
    })))
}

/// Public interest counter
pub async fn adjust_interest(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<InterestRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_record_id(request.course_id.as_deref(), "Course")?;
    let action: InterestAction = request
        .action
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Action is required".to_string()))?
        .parse()
        .map_err(ApiError::Validation)?;

    let client = request
        .client_id
        .as_deref()
        .map(str::trim)
        .filter(|client| !client.is_empty());
    if client.is_some_and(|client| client.len() > MAX_CLIENT_ID_LEN) {
        return Err(ApiError::Validation(format!(
            "Client ID must be at most {} characters long",
            MAX_CLIENT_ID_LEN
        )));
    }

    let interesting_students = state
        .courses
        .adjust_interest(id, action, client)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(json!({
        "success": true,
        "interestingStudents": interesting_students,
    })))
}
