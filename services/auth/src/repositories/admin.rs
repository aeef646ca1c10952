//! Admin repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use common::session::AdminRole;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::CredentialStore;
use crate::models::{AdminRecord, NewAdmin};

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn admin_from_row(row: &PgRow) -> DatabaseResult<AdminRecord> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<AdminRole>()
        .map_err(|e| DatabaseError::Decode(e.to_string()))?;

    Ok(AdminRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        created_at: row.try_get("created_at")?,
        last_login: row.try_get("last_login")?,
    })
}

#[async_trait]
impl CredentialStore for AdminRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at, last_login
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(admin_from_row).transpose()
    }

    async fn insert(&self, admin: &NewAdmin) -> DatabaseResult<AdminRecord> {
        info!("Creating admin: {}", admin.username);

        let row = sqlx::query(
            r#"
            INSERT INTO admins (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, created_at, last_login
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(AdminRole::Admin.as_str())
        .fetch_one(&self.pool)
        .await?;

        admin_from_row(&row)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()> {
        sqlx::query("UPDATE admins SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
