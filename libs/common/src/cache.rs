//! Redis access for short-lived markers
//!
//! Every key is placed under a namespace so several deployments can share
//! one Redis instance.

use anyhow::Result;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::info;

const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
const DEFAULT_NAMESPACE: &str = "kainaat";

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    /// Prefix joined to every key with `:`
    pub namespace: String,
}

impl RedisConfig {
    /// Read `REDIS_URL` and `REDIS_NAMESPACE`, falling back to a local instance
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            namespace: std::env::var("REDIS_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    namespace: String,
}

impl RedisPool {
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        info!("Redis client initialized for namespace {}", config.namespace);
        Ok(Self {
            client,
            namespace: config.namespace.clone(),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Store a marker under `key` that Redis drops after `ttl_seconds`
    pub async fn put_expiring(&self, key: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(self.namespaced(key), 1u8, ttl_seconds).await?;
        Ok(())
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let found: bool = conn.exists(self.namespaced(key)).await?;
        Ok(found)
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}
