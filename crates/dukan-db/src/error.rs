//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ```text
//! SQLite Error (sqlx::Error)
//!      │
//!      ▼
//! DbError (this module) ← adds context and categorization
//!      │
//!      ▼
//! LedgerError::Storage (dukan-ledger) ← what callers see
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// Wraps sqlx failures with enough context for logging and user-facing
/// messages.
#[derive(Debug, Error)]
pub enum DbError {
    /// The requested row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A CHECK, UNIQUE, or NOT NULL constraint was violated.
    ///
    /// The schema repeats the ledger invariants (quantity >= 0, positive
    /// rate) as constraints, so this surfaces when a write slips past the
    /// validation layer.
    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Could not open or reach the database.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A migration did not apply cleanly.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// A statement failed to execute.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Every pooled connection is in use.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that has no mapping above.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// NotFound for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Maps sqlx errors onto the taxonomy above. Database-level errors are
/// split by message: SQLite reports every constraint class with a
/// "constraint failed" message.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // e.g. "CHECK constraint failed: quantity"
                if msg.contains("constraint failed") {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
