//! # Validation Module
//!
//! Input validation for ledger operations.
//!
//! Runs before any business logic touches storage: a failed validation
//! leaves every table untouched. The database schema repeats the hard
//! constraints (non-negative quantity, positive rate) as CHECKs.
//!
//! ## Usage
//! ```rust
//! use dukan_core::validation::{validate_lot_name, validate_quantity};
//!
//! let name = validate_lot_name("  Milk ").unwrap();
//! assert_eq!(name, "Milk");
//!
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_LOT_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a lot name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming whitespace
/// - Must be at most 200 characters
pub fn validate_lot_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a stock-listing name filter.
///
/// ## Rules
/// - Can be empty (no filtering)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed filter string.
pub fn validate_name_filter(filter: &str) -> ValidationResult<String> {
    let filter = filter.trim();

    if filter.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "filter".to_string(),
            max: 100,
        });
    }

    Ok(filter.to_string())
}

/// Validates a lot id string format.
///
/// ## Rules
/// - Must not be empty
/// - Must be a valid UUID
pub fn validate_lot_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "lot id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "lot id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase or sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LOT_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LOT_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LOT_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (giveaways)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a buy/sell price pair at purchase entry.
///
/// ## Rules
/// - Both prices must be non-negative
/// - Sell price must not be below buy price
pub fn validate_price_pair(sell_cents: i64, buy_cents: i64) -> ValidationResult<()> {
    validate_price_cents(buy_cents)?;
    validate_price_cents(sell_cents)?;

    if sell_cents < buy_cents {
        return Err(ValidationError::SellBelowBuy {
            sell_cents,
            buy_cents,
        });
    }

    Ok(())
}

/// Validates a USD → IQD exchange rate.
///
/// ## Rules
/// - Must be finite
/// - Must be positive (> 0)
pub fn validate_exchange_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "exchange rate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if rate <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "exchange rate".to_string(),
        });
    }

    Ok(())
}

/// Validates a low-stock threshold.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::OutOfRange {
            field: "low stock threshold".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
