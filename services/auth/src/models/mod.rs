//! Authentication service models

pub mod admin;

// Re-export for convenience
pub use admin::{AdminRecord, AdminSummary, NewAdmin};
