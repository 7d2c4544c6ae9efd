//! # Record Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (eshop-client) ← Maps to user-facing outcomes              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Not found" is a normal outcome in this store, never an error: point
//! lookups return `Ok(None)` and scans return an empty Vec.

use thiserror::Error;

/// Record store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be opened or has gone away.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue, disk full
    /// - Pool closed or exhausted
    ///
    /// Fatal for the call; no retry policy exists at this layer.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// Unique index violation.
    ///
    /// ## When This Occurs
    /// - Inserting a user whose normalized email already has a record.
    ///   The unique index is the authority; callers may pre-check, but
    ///   a concurrent insert still lands here.
    #[error("Duplicate {field}: '{value}' already exists")]
    DuplicateKey { field: String, value: String },

    /// Malformed input reached the store (e.g. an order with no items).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Password hashing primitive failed. Environment-level, not
    /// recoverable by the caller.
    #[error("Credential operation failed: {0}")]
    Credential(String),

    /// Internal store error (decode failures, unexpected states).
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a DuplicateKey error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database(UNIQUE…)  → StoreError::DuplicateKey
/// sqlx::Error::PoolTimedOut       → StoreError::Unavailable
/// sqlx::Error::PoolClosed         → StoreError::Unavailable
/// Other                           → StoreError::QueryFailed / Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports constraint violations as:
                // "UNIQUE constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    StoreError::DuplicateKey {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    StoreError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("connection pool exhausted".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::Unavailable("pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = StoreError::duplicate("users.email", "jane@example.com");
        assert_eq!(
            err.to_string(),
            "Duplicate users.email: 'jane@example.com' already exists"
        );
    }
}
