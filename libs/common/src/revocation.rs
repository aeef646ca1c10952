//! Revoked session tokens
//!
//! Logout places the token here for the rest of its lifetime; the gate
//! refuses any token found in the list.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::cache::RedisPool;

#[async_trait]
pub trait RevocationList: Send + Sync {
    /// Revoke `token` for `ttl_seconds`; zero is a no-op
    async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<()>;

    async fn is_revoked(&self, token: &str) -> Result<bool>;
}

/// Revocation list shared by every service instance through Redis
#[derive(Clone)]
pub struct RedisRevocationList {
    redis_pool: RedisPool,
}

impl RedisRevocationList {
    pub fn new(redis_pool: RedisPool) -> Self {
        Self { redis_pool }
    }

    fn key(token: &str) -> String {
        format!("revoked_session:{}", token)
    }
}

#[async_trait]
impl RevocationList for RedisRevocationList {
    async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }
        self.redis_pool.put_expiring(&Self::key(token), ttl_seconds).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool> {
        self.redis_pool.contains(&Self::key(token)).await
    }
}

/// Process-local revocation list for development and tests
#[derive(Clone, Default)]
pub struct MemoryRevocationList {
    entries: Arc<Mutex<HashMap<String, Instant>>>,
}

impl MemoryRevocationList {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationList for MemoryRevocationList {
    async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, expires| *expires > now);
        entries.insert(token.to_string(), now + Duration::from_secs(ttl_seconds));
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(token)
            .is_some_and(|expires| *expires > Instant::now()))
    }
}
