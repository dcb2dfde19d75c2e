//! # dukan-core: Pure Business Logic for Dukan
//!
//! This crate is the heart of the Dukan inventory ledger. It contains the
//! domain types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                UI layer (forms, tables)                  │
//! │           out of scope for this workspace                │
//! └───────────────────────────┬──────────────────────────────┘
//! ┌───────────────────────────▼──────────────────────────────┐
//! │                dukan-ledger (operations)                 │
//! │   add_purchase_lot · sell_units · reports · settings     │
//! └───────────────────────────┬──────────────────────────────┘
//! ┌───────────────────────────▼──────────────────────────────┐
//! │              ★ dukan-core (THIS CRATE) ★                 │
//! │                                                          │
//! │   ┌──────────┐  ┌──────────┐  ┌────────────┐             │
//! │   │  types   │  │  money   │  │ validation │             │
//! │   │ ProductL │  │  Money   │  │   rules    │             │
//! │   │ SaleRec  │  │ ExchRate │  │   checks   │             │
//! │   └──────────┘  └──────────┘  └────────────┘             │
//! │                                                          │
//! │   NO I/O - NO DATABASE - PURE FUNCTIONS                  │
//! └───────────────────────────┬──────────────────────────────┘
//! ┌───────────────────────────▼──────────────────────────────┐
//! │                 dukan-db (SQLite layer)                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductLot, SaleRecord, Settings, reports)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error type
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database and file system access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukan_core::Money` instead of
// `use dukan_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default USD → IQD exchange rate seeded into new databases.
pub const DEFAULT_EXCHANGE_RATE: f64 = 1500.0;

/// Default low-stock threshold seeded into new databases.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Default window, in days, for the expiring-soon portion of the dashboard.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 7;

/// Maximum units accepted in a single purchase entry or sale.
///
/// Guards against typo-sized quantities (e.g. 1000000 instead of 100).
pub const MAX_LOT_QUANTITY: i64 = 1_000_000;
