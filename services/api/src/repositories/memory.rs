//! In-memory entity stores for development and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{COURSE_TITLE_INDEX, CourseStore, TEACHER_EMAIL_INDEX, TeacherStore};
use crate::models::{Course, CourseFields, Gender, InterestAction, Teacher, TeacherFields};

fn unique_violation(index: &str) -> DatabaseError {
    DatabaseError::UniqueViolation {
        constraint: index.to_string(),
    }
}

/// Newest first; among equal timestamps the later insert wins
fn newest_first<T: Clone>(records: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

#[derive(Default)]
struct CourseTable {
    courses: Vec<Course>,
    votes: HashSet<(Uuid, String)>,
}

#[derive(Clone, Default)]
pub struct MemoryCourseStore {
    table: Arc<RwLock<CourseTable>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn list(&self) -> DatabaseResult<Vec<Course>> {
        let table = self.table.read().await;
        Ok(newest_first(&table.courses, |c| c.created_at))
    }

    async fn insert(&self, fields: &CourseFields) -> DatabaseResult<Course> {
        let mut table = self.table.write().await;
        if table.courses.iter().any(|c| c.title == fields.title) {
            return Err(unique_violation(COURSE_TITLE_INDEX));
        }

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            details: fields.details.clone(),
            instructor: fields.instructor.clone(),
            level: fields.level,
            duration: fields.duration.clone(),
            image: fields.image.clone(),
            color: fields.color.clone(),
            interesting_students: 0,
            created_at: now,
            updated_at: now,
        };
        table.courses.push(course.clone());
        Ok(course)
    }

    async fn update(&self, id: Uuid, fields: &CourseFields) -> DatabaseResult<Option<Course>> {
        let mut table = self.table.write().await;
        let Some(position) = table.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        if table
            .courses
            .iter()
            .any(|c| c.id != id && c.title == fields.title)
        {
            return Err(unique_violation(COURSE_TITLE_INDEX));
        }

        let course = &mut table.courses[position];

        course.title = fields.title.clone();
        course.description = fields.description.clone();
        course.details = fields.details.clone();
        course.instructor = fields.instructor.clone();
        course.level = fields.level;
        course.duration = fields.duration.clone();
        course.image = fields.image.clone();
        course.color = fields.color.clone();
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Course>> {
        let mut table = self.table.write().await;
        let Some(position) = table.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        table.votes.retain(|(course_id, _)| *course_id != id);
        Ok(Some(table.courses.remove(position)))
    }

    async fn adjust_interest(
        &self,
        id: Uuid,
        action: InterestAction,
        client: Option<&str>,
    ) -> DatabaseResult<Option<i64>> {
        let mut table = self.table.write().await;
        let Some(position) = table.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let applies = match (client, action) {
            (None, _) => true,
            (Some(client), InterestAction::Increment) => {
                table.votes.insert((id, client.to_string()))
            }
            (Some(client), InterestAction::Decrement) => {
                table.votes.remove(&(id, client.to_string()))
            }
        };

        let course = &mut table.courses[position];
        if applies {
            course.interesting_students = match action {
                InterestAction::Increment => course.interesting_students + 1,
                InterestAction::Decrement => (course.interesting_students - 1).max(0),
            };
        }
        Ok(Some(course.interesting_students))
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.table.read().await.courses.len() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MemoryTeacherStore {
    teachers: Arc<RwLock<Vec<Teacher>>>,
}

impl MemoryTeacherStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply_teacher_fields(teacher: &mut Teacher, fields: &TeacherFields) {
    teacher.name = fields.name.clone();
    teacher.email = fields.email.clone();
    teacher.phone = fields.phone.clone();
    teacher.subject = fields.subject.clone();
    teacher.bio = fields.bio.clone();
    teacher.experience = fields.experience.clone();
    teacher.avatar = fields.avatar.clone();
    teacher.rating = fields.rating;
    teacher.degrees = fields.degrees.clone();
    teacher.gender = fields.gender;
    teacher.backgrounds = fields.backgrounds.clone();
    teacher.languages = fields.languages.clone();
    teacher.students = fields.students;
}

#[async_trait]
impl TeacherStore for MemoryTeacherStore {
    async fn list(&self, gender: Option<Gender>) -> DatabaseResult<Vec<Teacher>> {
        let teachers = self.teachers.read().await;
        let mut listed = newest_first(&teachers, |t| t.created_at);
        if let Some(gender) = gender {
            listed.retain(|t| t.gender == gender);
        }
        Ok(listed)
    }

    async fn insert(&self, fields: &TeacherFields) -> DatabaseResult<Teacher> {
        let mut teachers = self.teachers.write().await;
        if teachers.iter().any(|t| t.email == fields.email) {
            return Err(unique_violation(TEACHER_EMAIL_INDEX));
        }

        let now = Utc::now();
        let teacher = Teacher {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            subject: fields.subject.clone(),
            bio: fields.bio.clone(),
            experience: fields.experience.clone(),
            avatar: fields.avatar.clone(),
            rating: fields.rating,
            degrees: fields.degrees.clone(),
            gender: fields.gender,
            backgrounds: fields.backgrounds.clone(),
            languages: fields.languages.clone(),
            students: fields.students,
            created_at: now,
            updated_at: now,
        };
        teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn update(&self, id: Uuid, fields: &TeacherFields) -> DatabaseResult<Option<Teacher>> {
        let mut teachers = self.teachers.write().await;
        let Some(position) = teachers.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        if teachers.iter().any(|t| t.id != id && t.email == fields.email) {
            return Err(unique_violation(TEACHER_EMAIL_INDEX));
        }

        let teacher = &mut teachers[position];
        apply_teacher_fields(teacher, fields);
        teacher.updated_at = Utc::now();
        Ok(Some(teacher.clone()))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Teacher>> {
        let mut teachers = self.teachers.write().await;
        let position = teachers.iter().position(|t| t.id == id);
        Ok(position.map(|position| teachers.remove(position)))
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.teachers.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseInput, TeacherInput};

    fn course(title: &str) -> CourseFields {
        CourseInput {
            title: Some(title.to_string()),
            description: Some("An introduction".to_string()),
            instructor: Some("Ustadh Kareem".to_string()),
            level: Some("Beginner".to_string()),
            duration: Some("4 weeks".to_string()),
            ..CourseInput::default()
        }
        .validate()
        .unwrap()
    }

    fn teacher(email: &str, gender: &str) -> TeacherFields {
        TeacherInput {
            name: Some("Amina Rahman".to_string()),
            email: Some(email.to_string()),
            subject: Some("Arabic".to_string()),
            bio: Some("Grammar".to_string()),
            experience: Some("3-5 years".to_string()),
            gender: Some(gender.to_string()),
            ..TeacherInput::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn interest_is_clamped_at_zero() {
        let store = MemoryCourseStore::new();
        let id = store.insert(&course("Intro to Arabic")).await.unwrap().id;

        for expected in [1, 2] {
            let value = store
                .adjust_interest(id, InterestAction::Increment, None)
                .await
                .unwrap();
            assert_eq!(value, Some(expected));
        }
        for expected in [1, 0, 0] {
            let value = store
                .adjust_interest(id, InterestAction::Decrement, None)
                .await
                .unwrap();
            assert_eq!(value, Some(expected));
        }
    }

    #[tokio::test]
    async fn interest_counts_once_per_client() {
        let store = MemoryCourseStore::new();
        let id = store.insert(&course("Tajweed")).await.unwrap().id;

        let once = Some("browser-1");
        assert_eq!(
            store.adjust_interest(id, InterestAction::Increment, once).await.unwrap(),
            Some(1)
        );
        assert_eq!(
            store.adjust_interest(id, InterestAction::Increment, once).await.unwrap(),
            Some(1)
        );
        assert_eq!(
            store
                .adjust_interest(id, InterestAction::Decrement, Some("browser-2"))
                .await
                .unwrap(),
            Some(1)
        );
        assert_eq!(
            store.adjust_interest(id, InterestAction::Decrement, once).await.unwrap(),
            Some(0)
        );
    }

    #[tokio::test]
    async fn unknown_course_interest_is_none() {
        let store = MemoryCourseStore::new();
        let value = store
            .adjust_interest(Uuid::new_v4(), InterestAction::Increment, None)
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn update_cannot_steal_a_title() {
        let store = MemoryCourseStore::new();
        store.insert(&course("Fiqh I")).await.unwrap();
        let second = store.insert(&course("Fiqh II")).await.unwrap();

        let error = store.update(second.id, &course("Fiqh I")).await.unwrap_err();
        assert!(error.violates(COURSE_TITLE_INDEX));

        let renamed = store
            .update(second.id, &course("Fiqh II (revised)"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.title, "Fiqh II (revised)");
        assert_eq!(renamed.created_at, second.created_at);
    }

    #[tokio::test]
    async fn courses_list_newest_first() {
        let store = MemoryCourseStore::new();
        store.insert(&course("First")).await.unwrap();
        store.insert(&course("Second")).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn teachers_filter_by_gender() {
        let store = MemoryTeacherStore::new();
        store.insert(&teacher("a@alkainaat.edu", "male")).await.unwrap();
        store.insert(&teacher("b@alkainaat.edu", "female")).await.unwrap();

        assert_eq!(store.list(None).await.unwrap().len(), 2);
        let women = store.list(Some(Gender::Female)).await.unwrap();
        assert_eq!(women.len(), 1);
        assert_eq!(women[0].email, "b@alkainaat.edu");
    }

    #[tokio::test]
    async fn duplicate_teacher_email_violates_index() {
        let store = MemoryTeacherStore::new();
        store.insert(&teacher("a@alkainaat.edu", "male")).await.unwrap();

        let error = store
            .insert(&teacher("a@alkainaat.edu", "female"))
            .await
            .unwrap_err();
        assert!(error.violates(TEACHER_EMAIL_INDEX));
    }

    #[tokio::test]
    async fn delete_returns_the_record_once() {
        let store = MemoryTeacherStore::new();
        let id = store.insert(&teacher("a@alkainaat.edu", "male")).await.unwrap().id;

        assert!(store.delete(id).await.unwrap().is_some());
        assert!(store.delete(id).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
