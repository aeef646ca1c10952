//! Creation of administrator accounts
//!
//! Accounts come from two places: the guarded provisioning endpoint and the
//! bootstrap credentials applied when the store holds no admin at all.

use common::error::DatabaseError;
use common::validation::{validate_email, validate_password, validate_username};
use thiserror::Error;
use tracing::info;

use crate::config::BootstrapAdmin;
use crate::models::{AdminRecord, NewAdmin};
use crate::password;
use crate::repositories::{CredentialStore, EMAIL_INDEX, USERNAME_INDEX};

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Credential store error: {0}")]
    Store(DatabaseError),

    #[error("{0}")]
    Hash(anyhow::Error),
}

impl From<DatabaseError> for ProvisionError {
    fn from(error: DatabaseError) -> Self {
        if error.violates(USERNAME_INDEX) {
            ProvisionError::Conflict("Admin with this username already exists")
        } else if error.violates(EMAIL_INDEX) {
            ProvisionError::Conflict("Admin with this email already exists")
        } else if error.is_unique_violation() {
            ProvisionError::Conflict("Admin with this username or email already exists")
        } else {
            ProvisionError::Store(error)
        }
    }
}

/// Validate and store a new administrator
pub async fn provision_admin(
    store: &dyn CredentialStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<AdminRecord, ProvisionError> {
    validate_username(username).map_err(ProvisionError::Invalid)?;
    validate_email(email).map_err(ProvisionError::Invalid)?;
    validate_password(password).map_err(ProvisionError::Invalid)?;

    let password_hash = password::hash_password(password).map_err(ProvisionError::Hash)?;

    let admin = store
        .insert(&NewAdmin {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!("Provisioned admin {}", admin.username);
    Ok(admin)
}

/// Create the first administrator when the store is empty
///
/// Returns `None` when an administrator already exists.
pub async fn bootstrap_first_admin(
    store: &dyn CredentialStore,
    bootstrap: &BootstrapAdmin,
) -> Result<Option<AdminRecord>, ProvisionError> {
    if store.count().await? > 0 {
        return Ok(None);
    }

    let admin = provision_admin(
        store,
        &bootstrap.username,
        &bootstrap.email,
        &bootstrap.password,
    )
    .await?;

    info!("Bootstrapped first admin {}", admin.username);
    Ok(Some(admin))
}
