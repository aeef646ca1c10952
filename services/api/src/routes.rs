//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{require_admin_api, require_admin_page},
};

pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod teachers;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let admin_api = Router::new()
        .route("/api/courses/list", get(courses::list_courses))
        .route("/api/courses/add", post(courses::add_course))
        .route("/api/courses/update", put(courses::update_course))
        .route("/api/courses/delete", delete(courses::delete_course))
        .route("/api/teachers/list", get(teachers::list_teachers))
        .route("/api/teachers/add", post(teachers::add_teacher))
        .route("/api/teachers/update", put(teachers::update_teacher))
        .route("/api/teachers/delete", delete(teachers::delete_teacher))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_api,
        ));

    let admin_pages = Router::new()
        .route("/admin/dashboard", get(dashboard::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_page,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/courses/public", get(courses::public_courses))
        .route("/api/courses/interesting", post(courses::adjust_interest))
        .route("/api/teachers/public", get(teachers::public_teachers))
        .route("/api/contact", post(contact::send_contact))
        .merge(admin_api)
        .merge(admin_pages)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Parse a record id from a request body, `entity` as in "Course"
fn parse_record_id(raw: Option<&str>, entity: &str) -> Result<Uuid, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} ID is required", entity)))?;

    Uuid::parse_str(raw).map_err(|_| {
        ApiError::Validation(format!("Invalid {} ID format", entity.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_errors_name_the_entity() {
        let missing = parse_record_id(None, "Course").unwrap_err();
        assert_eq!(missing.to_string(), "Course ID is required");

        let blank = parse_record_id(Some("  "), "Teacher").unwrap_err();
        assert_eq!(blank.to_string(), "Teacher ID is required");

        let invalid = parse_record_id(Some("64f1c2e9a1b2c3d4e5f60718"), "Course").unwrap_err();
        assert_eq!(invalid.to_string(), "Invalid course ID format");
    }

    #[test]
    fn record_id_accepts_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(Some(&id.to_string()), "Course").unwrap(), id);
    }
}
