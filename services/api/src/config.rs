//! API service settings
//!
//! Loaded from `KAINAAT_*` environment variables; the session secret must
//! match the one the authentication service signs with.

use anyhow::{Context, Result};
use chrono::Duration;
use common::database::StorageBackend;
use common::session::{DEFAULT_SESSION_TTL_HOURS, SessionCodec};
use serde::Deserialize;

use crate::models::Gender;

pub const ENV_PREFIX: &str = "KAINAAT";

/// Default `from` address for contact notifications
pub const DEFAULT_CONTACT_SENDER: &str = "Al Kainaat LDI <onboarding@resend.dev>";

/// Which teachers the public listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicTeacherFilter {
    Male,
    Female,
    All,
}

impl PublicTeacherFilter {
    /// Gender to filter on, `None` for every teacher
    pub fn gender(&self) -> Option<Gender> {
        match self {
            PublicTeacherFilter::Male => Some(Gender::Male),
            PublicTeacherFilter::Female => Some(Gender::Female),
            PublicTeacherFilter::All => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub bind_address: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
    pub storage: StorageBackend,
    pub public_teacher_gender: PublicTeacherFilter,
    /// Contact form is answered with 500 until a key is configured
    pub resend_api_key: Option<String>,
    pub contact_recipient: Option<String>,
    pub contact_sender: String,
}

impl ApiSettings {
    pub fn load() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:3001")?
            .set_default("session_ttl_hours", DEFAULT_SESSION_TTL_HOURS)?
            .set_default("secure_cookies", true)?
            .set_default("storage", "postgres")?
            .set_default("public_teacher_gender", "male")?
            .set_default("contact_sender", DEFAULT_CONTACT_SENDER)?
            .add_source(environment.try_parsing(true))
            .build()?;

        settings
            .try_deserialize()
            .context("Invalid API service settings")
    }

    pub fn session_codec(&self) -> Result<SessionCodec> {
        SessionCodec::new(
            self.session_secret.as_bytes(),
            Duration::hours(self.session_ttl_hours),
        )
    }
}
