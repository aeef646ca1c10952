//! Credential store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{AdminRecord, NewAdmin};

pub mod admin;
pub mod memory;

pub use admin::AdminRepository;
pub use memory::MemoryCredentialStore;

/// Unique index on `admins.username`
pub const USERNAME_INDEX: &str = "admins_username_key";
/// Unique index on `admins.email`
pub const EMAIL_INDEX: &str = "admins_email_key";

/// Persistent collection of administrator credentials
///
/// Username and email uniqueness are enforced by the store; a clashing
/// insert fails with `DatabaseError::UniqueViolation` naming the index.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an administrator by exact username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminRecord>>;

    async fn insert(&self, admin: &NewAdmin) -> DatabaseResult<AdminRecord>;

    /// Stamp a successful login
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()>;

    async fn count(&self) -> DatabaseResult<i64>;
}
