//! Teacher repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use super::TeacherStore;
use crate::models::{Degree, Gender, Teacher, TeacherFields};

const TEACHER_COLUMNS: &str = "id, name, email, phone, subject, bio, experience, avatar, rating, \
     degrees, gender, backgrounds, languages, students, created_at, updated_at";

/// Teacher repository
#[derive(Clone)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn teacher_from_row(row: &PgRow) -> DatabaseResult<Teacher> {
    let gender: String = row.try_get("gender")?;
    let gender = gender.parse::<Gender>().map_err(DatabaseError::Decode)?;
    let degrees: Json<Vec<Degree>> = row.try_get("degrees")?;

    Ok(Teacher {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        subject: row.try_get("subject")?,
        bio: row.try_get("bio")?,
        experience: row.try_get("experience")?,
        avatar: row.try_get("avatar")?,
        rating: row.try_get("rating")?,
        degrees: degrees.0,
        gender,
        backgrounds: row.try_get("backgrounds")?,
        languages: row.try_get("languages")?,
        students: row.try_get("students")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl TeacherStore for TeacherRepository {
    async fn list(&self, gender: Option<Gender>) -> DatabaseResult<Vec<Teacher>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM teachers
            WHERE $1::TEXT IS NULL OR gender = $1
            ORDER BY created_at DESC
            "#,
            TEACHER_COLUMNS
        ))
        .bind(gender.map(|g| g.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(teacher_from_row).collect()
    }

    async fn insert(&self, fields: &TeacherFields) -> DatabaseResult<Teacher> {
        info!("Creating teacher: {}", fields.email);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO teachers (name, email, phone, subject, bio, experience, avatar, rating,
                                  degrees, gender, backgrounds, languages, students)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            TEACHER_COLUMNS
        ))
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.subject)
        .bind(&fields.bio)
        .bind(&fields.experience)
        .bind(&fields.avatar)
        .bind(fields.rating)
        .bind(Json(&fields.degrees))
        .bind(fields.gender.as_str())
        .bind(&fields.backgrounds)
        .bind(&fields.languages)
        .bind(fields.students)
        .fetch_one(&self.pool)
        .await?;

        teacher_from_row(&row)
    }

    async fn update(&self, id: Uuid, fields: &TeacherFields) -> DatabaseResult<Option<Teacher>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE teachers
            SET name = $2, email = $3, phone = $4, subject = $5, bio = $6, experience = $7,
                avatar = $8, rating = $9, degrees = $10, gender = $11, backgrounds = $12,
                languages = $13, students = $14, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TEACHER_COLUMNS
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.subject)
        .bind(&fields.bio)
        .bind(&fields.experience)
        .bind(&fields.avatar)
        .bind(fields.rating)
        .bind(Json(&fields.degrees))
        .bind(fields.gender.as_str())
        .bind(&fields.backgrounds)
        .bind(&fields.languages)
        .bind(fields.students)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(teacher_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Teacher>> {
        let row = sqlx::query(&format!(
            "DELETE FROM teachers WHERE id = $1 RETURNING {}",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(teacher_from_row).transpose()
    }

    async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
