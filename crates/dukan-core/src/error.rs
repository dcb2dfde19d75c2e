//! # Error Types
//!
//! Input-validation errors for dukan-core.
//!
//! The full error flow across the workspace:
//!
//! ```text
//! ValidationError (this crate) ──► LedgerError (dukan-ledger) ──► caller/UI
//! DbError (dukan-db)           ──►
//! ```
//!
//! Errors are enum variants with context fields, never bare strings, and
//! each variant maps to a user-facing message.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. They are raised
/// before any state is mutated, so the caller can correct the input and
/// retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed lot id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Selling price entered below the purchase price.
    #[error("sell price {sell_cents} is below buy price {buy_cents}")]
    SellBelowBuy { sell_cents: i64, buy_cents: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================
