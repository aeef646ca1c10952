use anyhow::Result;
use common::cache::{RedisConfig, RedisPool};
use common::database::{self, DatabaseConfig, StorageBackend};
use common::revocation::{MemoryRevocationList, RedisRevocationList, RevocationList};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use auth::config::AuthSettings;
use auth::provisioning::bootstrap_first_admin;
use auth::repositories::{AdminRepository, CredentialStore, MemoryCredentialStore};
use auth::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting authentication service");

    let settings = AuthSettings::load()?;
    let codec = settings.session_codec()?;

    let mut pool: Option<PgPool> = None;
    let (credentials, revocations): (Arc<dyn CredentialStore>, Arc<dyn RevocationList>) =
        match settings.storage {
            StorageBackend::Postgres => {
                let db_config = DatabaseConfig::from_env()?;
                let db_pool = database::init_pool(&db_config).await?;

                // Check database connectivity
                if database::health_check(&db_pool).await? {
                    info!("Database connection successful");
                } else {
                    anyhow::bail!("Failed to connect to database");
                }
                database::run_migrations(&db_pool).await?;

                let redis_config = RedisConfig::from_env()?;
                let redis_pool = RedisPool::new(&redis_config).await?;
                if !redis_pool.health_check().await? {
                    anyhow::bail!("Failed to connect to Redis");
                }

                pool = Some(db_pool.clone());
                (
                    Arc::new(AdminRepository::new(db_pool)),
                    Arc::new(RedisRevocationList::new(redis_pool)),
                )
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; accounts are lost on shutdown");
                (
                    Arc::new(MemoryCredentialStore::new()),
                    Arc::new(MemoryRevocationList::new()),
                )
            }
        };

    if let Some(bootstrap) = settings.bootstrap_admin() {
        bootstrap_first_admin(credentials.as_ref(), &bootstrap).await?;
    }

    let bind_address = settings.bind_address.clone();
    let app_state = AppState::new(credentials, revocations, codec, settings);

    // Start the web server
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Authentication service listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        info!("Database pool closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
