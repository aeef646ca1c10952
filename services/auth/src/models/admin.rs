//! Administrator credential model

use chrono::{DateTime, Utc};
use common::session::AdminRole;
use serde::Serialize;
use uuid::Uuid;

/// Administrator entity
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string, salt included
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// New administrator payload, password already hashed
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of an administrator, safe to return to clients
#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
}

impl From<&AdminRecord> for AdminSummary {
    fn from(admin: &AdminRecord) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            email: admin.email.clone(),
            role: admin.role,
        }
    }
}
