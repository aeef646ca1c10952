//! Common library for the Kainaat institute services
//!
//! This crate provides shared functionality used by the auth and api
//! services: database connectivity and migrations, the Redis client, the
//! storage error type, admin session tokens and the revocation list.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod database;
pub mod error;
pub mod revocation;
pub mod session;
pub mod validation;
