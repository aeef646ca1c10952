//! Admin session tokens
//!
//! A session descriptor travels inside an HS256-signed JWT stored in the
//! `admin-token` cookie. There is no server-side session record; validity is
//! decided from the signature and the issue time, with logout handled by the
//! revocation list.

use anyhow::{Result, anyhow};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "admin-token";

/// Default validity window of a session
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Role carried by an administrator session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            other => Err(anyhow!("Unknown admin role: {}", other)),
        }
    }
}

/// Decoded content of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    pub admin_id: Uuid,
    pub username: String,
    pub role: AdminRole,
    pub issued_at: DateTime<Utc>,
}

impl SessionDescriptor {
    /// Start a session now. The issue time is kept to whole seconds, the
    /// resolution of the `iat` claim.
    pub fn issue(admin_id: Uuid, username: impl Into<String>, role: AdminRole) -> Self {
        Self {
            admin_id,
            username: username.into(),
            role,
            issued_at: Utc::now().trunc_subsecs(0),
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Admin ID
    sub: Uuid,
    username: String,
    role: AdminRole,
    /// Issued at time
    iat: i64,
    /// Expiration time
    exp: i64,
}

/// Failure to turn a transport string back into a descriptor
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("session token is malformed: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),

    #[error("session token carries an out of range issue time")]
    IssuedAt,
}

/// Encodes and decodes session tokens
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionCodec {
    /// Shortest accepted signing secret, in bytes
    pub const MIN_SECRET_LEN: usize = 32;

    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(anyhow!(
                "Session secret must be at least {} bytes long",
                Self::MIN_SECRET_LEN
            ));
        }
        if ttl <= Duration::zero() {
            return Err(anyhow!("Session lifetime must be positive"));
        }

        // Expiry is judged from `iat` by `SessionState::classify`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Validity window of a session
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn encode(&self, descriptor: &SessionDescriptor) -> Result<String> {
        let iat = descriptor.issued_at.timestamp();
        let claims = Claims {
            sub: descriptor.admin_id,
            username: descriptor.username.clone(),
            role: descriptor.role,
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn decode(&self, token: &str) -> Result<SessionDescriptor, DecodeError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(DecodeError::IssuedAt)?;

        Ok(SessionDescriptor {
            admin_id: claims.sub,
            username: claims.username,
            role: claims.role,
            issued_at,
        })
    }

    /// Seconds left before `descriptor` expires, zero once expired
    pub fn remaining_lifetime(&self, descriptor: &SessionDescriptor, now: DateTime<Utc>) -> u64 {
        let remaining = self.ttl - descriptor.age(now);
        remaining.num_seconds().max(0) as u64
    }
}

/// Classification of the session presented with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoToken,
    Malformed,
    Expired,
    Valid(SessionDescriptor),
}

impl SessionState {
    pub fn classify(token: Option<&str>, codec: &SessionCodec, now: DateTime<Utc>) -> Self {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return SessionState::NoToken,
        };

        let descriptor = match codec.decode(token) {
            Ok(descriptor) => descriptor,
            Err(_) => return SessionState::Malformed,
        };

        if descriptor.age(now) > codec.ttl() {
            SessionState::Expired
        } else {
            SessionState::Valid(descriptor)
        }
    }

    /// Whether the client should be told to drop its cookie
    pub fn clears_cookie(&self) -> bool {
        matches!(self, SessionState::Malformed | SessionState::Expired)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            SessionState::NoToken => "no session token",
            SessionState::Malformed => "malformed session token",
            SessionState::Expired => "expired session token",
            SessionState::Valid(_) => "valid session",
        }
    }
}

/// Cookie handed to the browser after a successful login
pub fn session_cookie(token: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build()
}

/// Cookie to pass to `CookieJar::remove` to clear the session
pub fn session_cookie_removal() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
