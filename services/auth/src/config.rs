//! Authentication service settings
//!
//! Loaded from `KAINAAT_*` environment variables, e.g.
//! `KAINAAT_SESSION_SECRET` or `KAINAAT_LOGIN_MAX_ATTEMPTS`.

use anyhow::{Context, Result};
use chrono::Duration;
use common::database::StorageBackend;
use common::session::{DEFAULT_SESSION_TTL_HOURS, SessionCodec};
use serde::Deserialize;

use crate::rate_limiter::RateLimiterConfig;

/// Environment variable prefix shared by the services
pub const ENV_PREFIX: &str = "KAINAAT";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub bind_address: String,
    /// HMAC key for session tokens, shared with the api service
    pub session_secret: String,
    pub session_ttl_hours: i64,
    /// Adds the `Secure` attribute to the session cookie
    pub secure_cookies: bool,
    pub storage: StorageBackend,
    /// Enables `POST /api/admin/create` when set
    pub provisioning_secret: Option<String>,
    pub bootstrap_admin_username: Option<String>,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    pub login_max_attempts: u32,
    pub login_window_seconds: u64,
    pub login_ban_seconds: u64,
}

/// First administrator created on an empty credential store
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthSettings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        let limits = RateLimiterConfig::default();
        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("session_ttl_hours", DEFAULT_SESSION_TTL_HOURS)?
            .set_default("secure_cookies", true)?
            .set_default("storage", "postgres")?
            .set_default("login_max_attempts", i64::from(limits.max_attempts))?
            .set_default("login_window_seconds", limits.window_seconds as i64)?
            .set_default("login_ban_seconds", limits.ban_duration_seconds as i64)?
            .add_source(environment.try_parsing(true))
            .build()?;

        settings
            .try_deserialize()
            .context("Invalid authentication service settings")
    }

    pub fn session_codec(&self) -> Result<SessionCodec> {
        SessionCodec::new(
            self.session_secret.as_bytes(),
            Duration::hours(self.session_ttl_hours),
        )
    }

    pub fn rate_limiter_config(&self) -> RateLimiterConfig {
        RateLimiterConfig {
            max_attempts: self.login_max_attempts,
            window_seconds: self.login_window_seconds,
            ban_duration_seconds: self.login_ban_seconds,
        }
    }

    /// Bootstrap credentials, present only when all three are configured
    pub fn bootstrap_admin(&self) -> Option<BootstrapAdmin> {
        Some(BootstrapAdmin {
            username: self.bootstrap_admin_username.clone()?,
            email: self.bootstrap_admin_email.clone()?,
            password: self.bootstrap_admin_password.clone()?,
        })
    }
}
