//! Administrator authentication service
//!
//! Verifies admin credentials, issues signed session cookies, revokes them on
//! logout and provisions new administrator accounts.

pub mod authenticator;
pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod provisioning;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
