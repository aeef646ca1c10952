//! Entity stores for courses and teachers

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Course, CourseFields, Gender, InterestAction, Teacher, TeacherFields};

pub mod course;
pub mod memory;
pub mod teacher;

pub use course::CourseRepository;
pub use memory::{MemoryCourseStore, MemoryTeacherStore};
pub use teacher::TeacherRepository;

/// Unique index on `courses.title`
pub const COURSE_TITLE_INDEX: &str = "courses_title_key";
/// Unique index on `teachers.email`
pub const TEACHER_EMAIL_INDEX: &str = "teachers_email_key";

/// Persistent collection of courses
///
/// Title uniqueness is enforced by the store on both insert and update.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All courses, newest first
    async fn list(&self) -> DatabaseResult<Vec<Course>>;

    async fn insert(&self, fields: &CourseFields) -> DatabaseResult<Course>;

    /// Replace every mutable field; `None` when no course has `id`
    async fn update(&self, id: Uuid, fields: &CourseFields) -> DatabaseResult<Option<Course>>;

    /// Remove and return the course; `None` when no course has `id`
    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Course>>;

    /// Apply `action` to the interest counter, never going below zero
    ///
    /// With a `client` key the adjustment counts at most once per client:
    /// a repeated increment and a decrement without a prior increment leave
    /// the counter unchanged. Returns the resulting counter value.
    async fn adjust_interest(
        &self,
        id: Uuid,
        action: InterestAction,
        client: Option<&str>,
    ) -> DatabaseResult<Option<i64>>;

    async fn count(&self) -> DatabaseResult<i64>;
}

/// Persistent collection of teachers
///
/// Email uniqueness is enforced by the store on both insert and update.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    /// Teachers newest first, restricted to `gender` when given
    async fn list(&self, gender: Option<Gender>) -> DatabaseResult<Vec<Teacher>>;

    async fn insert(&self, fields: &TeacherFields) -> DatabaseResult<Teacher>;

    async fn update(&self, id: Uuid, fields: &TeacherFields) -> DatabaseResult<Option<Teacher>>;

    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Teacher>>;

    async fn count(&self) -> DatabaseResult<i64>;
}
