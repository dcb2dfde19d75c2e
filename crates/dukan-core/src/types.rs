//! # Domain Types
//!
//! Core domain types used throughout Dukan.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │   ProductLot    │   │   SaleRecord    │   │    Settings     │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  id (UUID)      │   │  id (UUID)      │   │  usd_to_iqd_rate│
//! │  name           │   │  product_id?    │   │  low_stock_     │
//! │  quantity       │   │  price snapshot │   │    threshold    │
//! │  prices (cents) │   │  profit (cents) │   └─────────────────┘
//! │  expiration?    │   │  sale_date      │
//! └─────────────────┘   └─────────────────┘
//! ```
//!
//! `SaleRecord.product_id` is a weak reference: the lot it points at may be
//! deleted later, so consumers must treat it as optional and rely on the
//! snapshot columns instead of a live join.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{DEFAULT_EXCHANGE_RATE, DEFAULT_LOW_STOCK_THRESHOLD};

// =============================================================================
// Exchange Rate
// =============================================================================

/// USD → IQD exchange rate, stored in thousandths of a dinar per dollar.
///
/// 1_500_000 millis = 1500.0 IQD per USD. Integer-backed so that currency
/// conversion stays in integer arithmetic end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate(i64);

impl ExchangeRate {
    /// Creates an exchange rate from thousandths of a dinar per dollar.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        ExchangeRate(millis)
    }

    /// Creates an exchange rate from a dinars-per-dollar figure.
    ///
    /// ## Example
    /// ```rust
    /// use dukan_core::types::ExchangeRate;
    ///
    /// let rate = ExchangeRate::from_rate(1450.5);
    /// assert_eq!(rate.millis(), 1_450_500);
    /// ```
    pub fn from_rate(rate: f64) -> Self {
        ExchangeRate((rate * 1000.0).round() as i64)
    }

    /// Returns the rate in thousandths of a dinar per dollar.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns the rate as dinars per dollar (for display only).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate::from_rate(DEFAULT_EXCHANGE_RATE)
    }
}

// =============================================================================
// Product Lot
// =============================================================================

/// A batch of stock bought together at one price/expiration, tracked as one
/// inventory row.
///
/// Quantity only moves down through sales and up through restocks; it never
/// goes negative. Zero-quantity lots stay visible in stock listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductLot {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name. Together with `expiration_date` this identifies the lot
    /// for restock merging.
    pub name: String,

    /// Units currently on hand. Always >= 0.
    pub quantity: i64,

    /// Purchase price per unit, in minor units.
    pub buy_price_cents: i64,

    /// Selling price per unit, in minor units.
    pub sell_price_cents: i64,

    /// Expiration date, if the goods are perishable.
    pub expiration_date: Option<NaiveDate>,

    /// When the lot was first recorded.
    pub created_at: DateTime<Utc>,

    /// When the lot was last restocked or sold against.
    pub updated_at: DateTime<Utc>,
}

impl ProductLot {
    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn buy_price(&self) -> Money {
        Money::from_cents(self.buy_price_cents)
    }

    /// Returns the selling price as a Money type.
    #[inline]
    pub fn sell_price(&self) -> Money {
        Money::from_cents(self.sell_price_cents)
    }

    /// Checks whether `quantity` units can be sold from this lot.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One entry in the sales ledger.
///
/// Uses the snapshot pattern: unit sell price and unit cost are copied from
/// the lot at the moment of sale, so later price edits never change history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    pub id: String,

    /// Weak reference to the lot sold against. May dangle after the product
    /// row is deleted.
    pub product_id: Option<String>,

    /// Units sold. Always > 0.
    pub quantity_sold: i64,

    /// Unit sell price at the moment of sale (frozen).
    pub unit_price_cents: i64,

    /// Unit purchase cost at the moment of sale (frozen).
    pub unit_cost_cents: i64,

    /// quantity_sold × unit_price_cents.
    pub total_cents: i64,

    /// quantity_sold × (unit_price_cents − unit_cost_cents).
    pub profit_cents: i64,

    pub sale_date: DateTime<Utc>,
}

impl SaleRecord {
    /// Returns the unit price snapshot as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the stored profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Sale Listing
// =============================================================================

/// A sale row as presented in the sales history: the ledger entry plus the
/// left-joined product name. `product_name` is `None` once the product row
/// has been deleted; the snapshot columns keep the row meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleListing {
    pub id: String,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity_sold: i64,
    pub unit_price_cents: i64,
    pub unit_cost_cents: i64,
    pub total_cents: i64,
    pub profit_cents: i64,
    pub sale_date: DateTime<Utc>,
}

// =============================================================================
// Settings
// =============================================================================

/// The two global configuration values, stored as a singleton row.
///
/// Reporting code receives these as an explicit value, not through a global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Settings {
    /// USD → IQD exchange rate. Always > 0.
    pub usd_to_iqd_rate: f64,

    /// On-hand quantity at or below which a lot counts as low stock.
    /// Always >= 0.
    pub low_stock_threshold: i64,
}

impl Settings {
    /// Returns the exchange rate as the integer-backed conversion type.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_rate(self.usd_to_iqd_rate)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            usd_to_iqd_rate: DEFAULT_EXCHANGE_RATE,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// One line of the low-stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LowStockItem {
    pub name: String,
    pub quantity: i64,
}

/// One line of the expiring-soon report. Lots without an expiration date
/// never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExpiringItem {
    pub name: String,
    pub expiration_date: NaiveDate,
}

/// Read-only aggregate for a single at-a-glance dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_lot_count: i64,
    pub total_quantity_on_hand: i64,
    pub total_units_sold: i64,
    /// All-time profit in IQD minor units (sum of sale snapshots).
    pub total_profit_cents: i64,
    /// The same profit converted to USD at the stored exchange rate.
    pub total_profit_usd_cents: i64,
    pub low_stock_items: Vec<LowStockItem>,
    pub expiring_soon_items: Vec<ExpiringItem>,
}

impl DashboardSummary {
    /// Returns the all-time profit as Money.
    #[inline]
    pub fn total_profit(&self) -> Money {
        Money::from_cents(self.total_profit_cents)
    }

    /// Returns the rate-derived USD profit as Money.
    #[inline]
    pub fn total_profit_usd(&self) -> Money {
        Money::from_cents(self.total_profit_usd_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
