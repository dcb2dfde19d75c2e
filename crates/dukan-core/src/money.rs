//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! Every monetary value in the system is an integer count of the smallest
//! currency unit. The database, calculations, and reports all use minor
//! units; only the UI converts to a formatted amount for display.
//!
//! ```text
//! ProductLot.buy_price_cents ──► sale snapshot ──► SaleRecord.profit_cents
//!                                                        │
//! Settings.usd_to_iqd_rate ──► ExchangeRate ──► rate-derived USD view
//! ```
//!
//! ## Usage
//! ```rust
//! use dukan_core::money::Money;
//!
//! // Create from minor units (the only constructor from raw numbers)
//! let price = Money::from_cents(1099);
//!
//! // Arithmetic operations
//! let total = price.multiply_quantity(3);
//! let with_delivery = price + Money::from_cents(500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::types::ExchangeRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Signed so that derived figures (profit on a discounted sale, corrections)
/// can go below zero. Single-field tuple struct, zero-cost over `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major_units(), 10);
    /// assert_eq!(Money::from_cents(-550).major_units(), -5);
    /// ```
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, absolute value).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(150);
    /// assert_eq!(unit_price.multiply_quantity(4).cents(), 600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Converts a USD amount to IQD at the given rate, rounding half up.
    ///
    /// Uses i128 intermediates so large amounts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::money::Money;
    /// use dukan_core::types::ExchangeRate;
    ///
    /// let rate = ExchangeRate::from_rate(1500.0);
    /// let one_dollar = Money::from_cents(100);
    /// // 1.00 USD at 1500 IQD/USD = 1500.00 IQD
    /// assert_eq!(one_dollar.usd_to_iqd(rate).cents(), 150_000);
    /// ```
    pub fn usd_to_iqd(&self, rate: ExchangeRate) -> Money {
        // rate.millis() is thousandths of a dinar per dollar:
        // iqd_cents = usd_cents * millis / 1000, rounded half up
        let iqd = (self.0 as i128 * rate.millis() as i128 + 500) / 1000;
        Money::from_cents(iqd as i64)
    }

    /// Converts an IQD amount to USD at the given rate, rounding half up.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::money::Money;
    /// use dukan_core::types::ExchangeRate;
    ///
    /// let rate = ExchangeRate::from_rate(1500.0);
    /// let iqd = Money::from_cents(150_000); // 1500.00 IQD
    /// assert_eq!(iqd.iqd_to_usd(rate).cents(), 100);
    /// ```
    pub fn iqd_to_usd(&self, rate: ExchangeRate) -> Money {
        let millis = rate.millis() as i128;
        let usd = (self.0 as i128 * 1000 + millis / 2) / millis;
        Money::from_cents(usd as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the bare amount with two decimals, no currency symbol.
/// Currency-formatted display is the UI layer's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_units().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
