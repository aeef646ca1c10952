//! Course repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{debug, info};
use uuid::Uuid;

use super::CourseStore;
use crate::models::course::DEFAULT_COURSE_COLOR;
use crate::models::{Course, CourseFields, CourseLevel, InterestAction};

const COURSE_COLUMNS: &str = "id, title, description, details, instructor, level, duration, \
     image, color, interesting_students, created_at, updated_at";

/// Course repository
#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn course_from_row(row: &PgRow) -> DatabaseResult<Course> {
    let level: String = row.try_get("level")?;
    let level = level.parse::<CourseLevel>().map_err(DatabaseError::Decode)?;
    let color: Option<String> = row.try_get("color")?;

    Ok(Course {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        details: row.try_get("details")?,
        instructor: row.try_get("instructor")?,
        level,
        duration: row.try_get("duration")?,
        image: row.try_get("image")?,
        color: color.unwrap_or_else(|| DEFAULT_COURSE_COLOR.to_string()),
        interesting_students: row.try_get("interesting_students")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl CourseStore for CourseRepository {
    async fn list(&self) -> DatabaseResult<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM courses ORDER BY created_at DESC",
            COURSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(course_from_row).collect()
    }

    async fn insert(&self, fields: &CourseFields) -> DatabaseResult<Course> {
        info!("Creating course: {}", fields.title);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO courses (title, description, details, instructor, level, duration, image, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.details)
        .bind(&fields.instructor)
        .bind(fields.level.as_str())
        .bind(&fields.duration)
        .bind(&fields.image)
        .bind(&fields.color)
        .fetch_one(&self.pool)
        .await?;

        course_from_row(&row)
    }

    async fn update(&self, id: Uuid, fields: &CourseFields) -> DatabaseResult<Option<Course>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE courses
            SET title = $2, description = $3, details = $4, instructor = $5, level = $6,
                duration = $7, image = $8, color = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.details)
        .bind(&fields.instructor)
        .bind(fields.level.as_str())
        .bind(&fields.duration)
        .bind(&fields.image)
        .bind(&fields.color)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(course_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<Option<Course>> {
        let row = sqlx::query(&format!(
            "DELETE FROM courses WHERE id = $1 RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(course_from_row).transpose()
    }

    async fn adjust_interest(
        &self,
        id: Uuid,
        action: InterestAction,
        client: Option<&str>,
    ) -> DatabaseResult<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<i64> = sqlx::query_scalar(
            "SELECT interesting_students FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let applies = match (client, action) {
            (None, _) => true,
            (Some(client), InterestAction::Increment) => {
                sqlx::query(
                    r#"
                    INSERT INTO course_interest_votes (course_id, client_key)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(id)
                .bind(client)
                .execute(&mut *tx)
                .await?
                .rows_affected()
                    == 1
            }
            (Some(client), InterestAction::Decrement) => {
                sqlx::query(
                    "DELETE FROM course_interest_votes WHERE course_id = $1 AND client_key = $2",
                )
                .bind(id)
                .bind(client)
                .execute(&mut *tx)
                .await?
                .rows_affected()
                    == 1
            }
        };

        let value = if applies {
            let statement = match action {
                InterestAction::Increment => {
                    "UPDATE courses SET interesting_students = interesting_students + 1 \
                     WHERE id = $1 RETURNING interesting_students"
                }
                InterestAction::Decrement => {
                    "UPDATE courses SET interesting_students = GREATEST(interesting_students - 1, 0) \
                     WHERE id = $1 RETURNING interesting_students"
                }
            };
            sqlx::query_scalar::<_, i64>(statement)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?
        } else {
            debug!("Interest adjustment for course {} already counted", id);
            current
        };

        tx.commit().await?;
        Ok(Some(value))
    }

    async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
