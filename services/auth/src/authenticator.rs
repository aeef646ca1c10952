//! Credential verification and session minting

use chrono::Utc;
use common::error::DatabaseError;
use common::session::{SessionCodec, SessionDescriptor};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::AdminRecord;
use crate::password;
use crate::repositories::CredentialStore;

/// Authentication failure
///
/// Unknown usernames and wrong passwords share one variant.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store error: {0}")]
    Store(#[from] DatabaseError),

    #[error("Failed to mint session token: {0}")]
    Token(anyhow::Error),
}

/// Outcome of a successful login
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub admin: AdminRecord,
    pub descriptor: SessionDescriptor,
    pub token: String,
}

#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    codec: SessionCodec,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, codec: SessionCodec) -> Self {
        Self { store, codec }
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthenticationError> {
        let admin = match self.store.find_by_username(username).await? {
            Some(admin) => admin,
            None => {
                password::verify_against_dummy(password);
                warn!("Login rejected: unknown username");
                return Err(AuthenticationError::InvalidCredentials);
            }
        };

        if !password::verify_password(password, &admin.password_hash) {
            warn!("Login rejected: wrong password for {}", admin.username);
            return Err(AuthenticationError::InvalidCredentials);
        }

        let now = Utc::now();
        self.store.record_login(admin.id, now).await?;

        let descriptor = SessionDescriptor::issue(admin.id, admin.username.clone(), admin.role);
        let token = self
            .codec
            .encode(&descriptor)
            .map_err(AuthenticationError::Token)?;

        info!("Admin {} logged in", admin.username);

        Ok(AuthenticatedSession {
            admin,
            descriptor,
            token,
        })
    }
}
