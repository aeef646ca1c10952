//! Custom error types for the common library
//!
//! This module defines the storage error type shared by the credential and
//! entity stores of every service.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A unique index rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated index, empty when the driver does not report it
        constraint: String,
    },

    /// A stored value could not be mapped back onto its domain type
    #[error("Stored value could not be decoded: {0}")]
    Decode(String),
}

impl DatabaseError {
    /// Classify a query failure, surfacing unique index violations
    pub fn from_query(error: SqlxError) -> Self {
        if let SqlxError::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return DatabaseError::UniqueViolation {
                    constraint: db_error.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        DatabaseError::Query(error)
    }

    /// Whether this error is a unique index violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation { .. })
    }

    /// Whether this error is a violation of the named unique index
    pub fn violates(&self, index: &str) -> bool {
        matches!(self, DatabaseError::UniqueViolation { constraint } if constraint == index)
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(error: SqlxError) -> Self {
        DatabaseError::from_query(error)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
