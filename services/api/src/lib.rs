//! Institute content API
//!
//! Course and teacher administration behind the admin session gate, the
//! public listings and interest counter, and the contact form.

pub mod config;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
