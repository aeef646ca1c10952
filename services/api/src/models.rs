//! API models for request and response payloads
//!
//! Records serialize in camelCase with the identifier under `_id`, the shape
//! the public site and the admin portal consume.

pub mod course;
pub mod teacher;

pub use course::{Course, CourseFields, CourseInput, CourseLevel, InterestAction};
pub use teacher::{Degree, Gender, Teacher, TeacherFields, TeacherInput};

/// Trimmed value of an optional text field, `None` when blank
pub(crate) fn optional_text(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
