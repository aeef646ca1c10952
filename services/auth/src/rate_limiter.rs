//! Rate limiter for preventing brute force login attempts
//!
//! An attempt reserves a slot before the password is checked, so parallel
//! requests for one key cannot exceed `max_attempts` verifications.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of failed attempts allowed inside the window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,       // 5 minutes
            ban_duration_seconds: 900, // 15 minutes
        }
    }
}

/// Rate limiter entry
#[derive(Debug)]
struct RateLimiterEntry {
    /// Number of failed attempts in the current window
    failures: u32,
    /// Attempts reserved but not yet finished
    pending: u32,
    /// Start of the current window
    window_start: Instant,
    /// Ban expiration time
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    fn new(now: Instant) -> Self {
        Self {
            failures: 0,
            pending: 0,
            window_start: now,
            ban_expires: None,
        }
    }

    fn is_banned(&self, now: Instant) -> bool {
        self.ban_expires.is_some_and(|expires| now < expires)
    }

    /// Nothing left worth remembering about this key
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        self.pending == 0
            && !self.is_banned(now)
            && now.duration_since(self.window_start) >= window
    }
}

/// Rate limiter keyed by login name
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Reserve an attempt for `key`; false while banned or out of attempts
    pub async fn try_reserve(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = self.window();
        entries.retain(|_, entry| !entry.is_stale(now, window));

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimiterEntry::new(now));

        if entry.is_banned(now) {
            return false;
        }
        if entry.ban_expires.take().is_some() || now.duration_since(entry.window_start) >= window {
            entry.failures = 0;
            entry.window_start = now;
        }

        if entry.failures + entry.pending >= self.config.max_attempts {
            return false;
        }
        entry.pending += 1;
        true
    }

    /// Finish a reserved attempt as failed, banning the key once the limit is reached
    pub async fn record_failure(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = self.window();
        entries.retain(|name, entry| name == key || !entry.is_stale(now, window));

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimiterEntry::new(now));
        entry.pending = entry.pending.saturating_sub(1);

        if now.duration_since(entry.window_start) >= window {
            entry.failures = 0;
            entry.window_start = now;
        }
        entry.failures += 1;

        if entry.failures >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            warn!(
                "Banned login key {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
        }
    }

    /// Give back a reserved attempt that decided nothing about the credentials
    pub async fn release(&self, key: &str) {
        if let Some(entry) = self.entries.lock().await.get_mut(key) {
            entry.pending = entry.pending.saturating_sub(1);
        }
    }

    /// Forget a key after a successful login
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }
}
