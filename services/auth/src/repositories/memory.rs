//! In-memory credential store for development and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use common::session::AdminRole;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, EMAIL_INDEX, USERNAME_INDEX};
use crate::models::{AdminRecord, NewAdmin};

#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    admins: Arc<RwLock<Vec<AdminRecord>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminRecord>> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.username == username).cloned())
    }

    async fn insert(&self, admin: &NewAdmin) -> DatabaseResult<AdminRecord> {
        // The write lock spans the check and the insert, like a unique index
        let mut admins = self.admins.write().await;

        if admins.iter().any(|a| a.username == admin.username) {
            return Err(DatabaseError::UniqueViolation {
                constraint: USERNAME_INDEX.to_string(),
            });
        }
        if admins.iter().any(|a| a.email == admin.email) {
            return Err(DatabaseError::UniqueViolation {
                constraint: EMAIL_INDEX.to_string(),
            });
        }

        let record = AdminRecord {
            id: Uuid::new_v4(),
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash: admin.password_hash.clone(),
            role: AdminRole::Admin,
            created_at: Utc::now(),
            last_login: None,
        };
        admins.push(record.clone());

        Ok(record)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()> {
        let mut admins = self.admins.write().await;
        if let Some(admin) = admins.iter_mut().find(|a| a.id == id) {
            admin.last_login = Some(at);
        }
        Ok(())
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.admins.read().await.len() as i64)
    }
}
