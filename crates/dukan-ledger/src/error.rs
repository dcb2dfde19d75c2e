//! # Ledger Error Types
//!
//! The error taxonomy callers of the stock ledger see.
//!
//! ```text
//! ValidationError (dukan-core) ──► LedgerError::Validation
//! DbError (dukan-db)           ──► LedgerError::Storage
//! ledger checks                ──► LotNotFound / InsufficientStock
//! ```
//!
//! Every variant is recoverable: the UI displays the message and lets the
//! user retry. Validation and not-found failures are raised before any
//! state is mutated; storage failures inside the sell sequence roll the
//! whole transaction back.

use thiserror::Error;

use dukan_core::ValidationError;
use dukan_db::DbError;

/// Errors from stock-ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad input: non-positive quantity, empty name, sell price below buy,
    /// invalid rate or threshold. Nothing was mutated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced lot does not exist. Nothing was mutated.
    #[error("lot not found: {lot_id}")]
    LotNotFound { lot_id: String },

    /// Requested quantity exceeds on-hand stock.
    ///
    /// Carries the actual availability so the caller can retry with a
    /// corrected amount.
    #[error("insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        lot_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Underlying persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================
