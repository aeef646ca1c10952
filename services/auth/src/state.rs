//! Application state shared across handlers

use common::revocation::RevocationList;
use common::session::SessionCodec;
use std::sync::Arc;

use crate::authenticator::Authenticator;
use crate::config::AuthSettings;
use crate::rate_limiter::RateLimiter;
use crate::repositories::CredentialStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub authenticator: Authenticator,
    pub codec: SessionCodec,
    pub revocations: Arc<dyn RevocationList>,
    pub rate_limiter: RateLimiter,
    pub settings: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationList>,
        codec: SessionCodec,
        settings: AuthSettings,
    ) -> Self {
        Self {
            authenticator: Authenticator::new(credentials.clone(), codec.clone()),
            rate_limiter: RateLimiter::new(settings.rate_limiter_config()),
            credentials,
            codec,
            revocations,
            settings: Arc::new(settings),
        }
    }
}
