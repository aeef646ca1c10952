mod support;

use api::config::PublicTeacherFilter;
use axum::http::StatusCode;
use serde_json::{Value, json};
use support::{TestApp, app, app_with};
use uuid::Uuid;

fn teacher(name: &str, email: &str, gender: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "subject": "Arabic grammar",
        "bio": "Teaches nahw and sarf",
        "experience": "3-5 years",
        "gender": gender,
        "degrees": [{ "degree": "MA Arabic", "university": "Umm al-Qura" }],
        "languages": ["Arabic", "English"]
    })
}

async fn create(app: &TestApp, body: Value) -> Value {
    let response = app.admin("POST", "/api/teachers/add", Some(body)).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.body["teacher"].clone()
}

#[tokio::test]
async fn created_teacher_gets_defaults() {
    let app = app();
    let created = create(
        &app,
        json!({
            "name": "Bilal Hassan",
            "email": "bilal@alkainaat.edu",
            "subject": "Fiqh",
            "bio": "Hanafi fiqh",
            "experience": "5+ years"
        }),
    )
    .await;

    assert_eq!(created["rating"], 5.0);
    assert_eq!(created["gender"], "male");
    assert_eq!(created["students"], 0);
    assert_eq!(created["degrees"], json!([]));
    assert_eq!(created["backgrounds"], json!([]));
    assert!(created.get("phone").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    create(&app, teacher("Amina Rahman", "amina@alkainaat.edu", "female")).await;

    let response = app
        .admin(
            "POST",
            "/api/teachers/add",
            Some(teacher("Another Amina", "amina@alkainaat.edu", "female")),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "Teacher with this email already exists");
}

#[tokio::test]
async fn add_validates_fields() {
    let app = app();

    let response = app
        .admin(
            "POST",
            "/api/teachers/add",
            Some(teacher("Amina Rahman", "not-an-email", "female")),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid email format");

    let mut body = teacher("Amina Rahman", "amina@alkainaat.edu", "female");
    body["rating"] = json!(9);
    let response = app.admin("POST", "/api/teachers/add", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Rating must be between 0 and 5");
}

#[tokio::test]
async fn public_listing_follows_the_configured_gender() {
    let app = app();
    create(&app, teacher("Bilal Hassan", "bilal@alkainaat.edu", "male")).await;
    create(&app, teacher("Amina Rahman", "amina@alkainaat.edu", "female")).await;

    let public = app.send("GET", "/api/teachers/public", None, None).await;
    let teachers = public.body["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["name"], "Bilal Hassan");

    let admin = app.admin("GET", "/api/teachers/list", None).await;
    assert_eq!(admin.body["teachers"].as_array().unwrap().len(), 2);
    assert_eq!(admin.body["teachers"][0]["name"], "Amina Rahman");
}

#[tokio::test]
async fn public_listing_can_show_everyone() {
    let app = app_with(PublicTeacherFilter::All, None);
    create(&app, teacher("Bilal Hassan", "bilal@alkainaat.edu", "male")).await;
    create(&app, teacher("Amina Rahman", "amina@alkainaat.edu", "female")).await;

    let public = app.send("GET", "/api/teachers/public", None, None).await;
    assert_eq!(public.body["teachers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_the_profile() {
    let app = app();
    let mut original = teacher("Amina Rahman", "amina@alkainaat.edu", "female");
    original["students"] = json!(40);
    original["phone"] = json!("+92 300 0000000");
    let created = create(&app, original).await;

    let mut body = json!({
        "name": "Amina Rahman",
        "email": "amina.rahman@alkainaat.edu",
        "subject": "Balagha",
        "bio": "Rhetoric",
        "experience": "5+ years"
    });
    body["teacherId"] = created["_id"].clone();
    let response = app.admin("PUT", "/api/teachers/update", Some(body)).await;
    assert_eq!(response.status, StatusCode::OK);

    let updated = &response.body["teacher"];
    assert_eq!(updated["email"], "amina.rahman@alkainaat.edu");
    assert_eq!(updated["subject"], "Balagha");
    assert_eq!(updated["gender"], "male");
    assert_eq!(updated["students"], 0);
    assert_eq!(updated["degrees"], json!([]));
    assert!(updated.get("phone").is_none());
}

#[tokio::test]
async fn update_of_unknown_teacher_is_not_found() {
    let app = app();
    let mut body = teacher("Amina Rahman", "amina@alkainaat.edu", "female");
    body["teacherId"] = json!(Uuid::new_v4().to_string());

    let response = app.admin("PUT", "/api/teachers/update", Some(body)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Teacher not found");
}

#[tokio::test]
async fn update_of_unknown_teacher_with_a_taken_email_is_not_found() {
    let app = app();
    create(&app, teacher("Amina Rahman", "amina@alkainaat.edu", "female")).await;
    let mut body = teacher("Amina Rahman", "amina@alkainaat.edu", "female");
    body["teacherId"] = json!(Uuid::new_v4().to_string());

    let response = app.admin("PUT", "/api/teachers/update", Some(body)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Teacher not found");
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let app = app();
    let created = create(&app, teacher("Bilal Hassan", "bilal@alkainaat.edu", "male")).await;
    let body = json!({ "teacherId": created["_id"] });

    let first = app
        .admin("DELETE", "/api/teachers/delete", Some(body.clone()))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["deletedTeacher"]["name"], "Bilal Hassan");
    assert_eq!(first.body["deletedTeacher"]["email"], "bilal@alkainaat.edu");

    let second = app.admin("DELETE", "/api/teachers/delete", Some(body)).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);

    let missing = app
        .admin("DELETE", "/api/teachers/delete", Some(json!({})))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "Teacher ID is required");
}
