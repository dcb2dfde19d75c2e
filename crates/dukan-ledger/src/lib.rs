//! # dukan-ledger: Stock Ledger Operations for Dukan
//!
//! The business-logic layer of the Dukan inventory tracker. Sits on top of
//! [`dukan_db`] and [`dukan_core`] and exposes the operations a UI layer
//! consumes:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  StockLedger (THIS CRATE)                │
//! │                                                          │
//! │  add_purchase_lot   merge restocks into (name, exp) lots │
//! │  sell_units         atomic decrement + snapshot sale row │
//! │  stock_listing      lots by expiration, name filter      │
//! │  sales_history      newest first, product name joined    │
//! │  low_stock_report   quantity <= threshold                │
//! │  expiring_soon_...  expiration <= today + window         │
//! │  total_profit       sum of stored sale snapshots         │
//! │  dashboard_summary  the at-a-glance aggregate            │
//! │  settings           validated read/write                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - On-hand quantity never goes negative; an over-draining sale fails
//!   with [`LedgerError::InsufficientStock`] and writes nothing.
//! - Each sale stores unit price and unit cost snapshots; history never
//!   shifts when product prices change later.
//! - The decrement and the sale insert commit together or not at all.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukan_db::{Database, DbConfig};
//! use dukan_ledger::{PurchaseEntry, StockLedger};
//!
//! let db = Database::new(DbConfig::new("./dukan.db")).await?;
//! let ledger = StockLedger::new(db);
//!
//! let lot = ledger.add_purchase_lot(PurchaseEntry { /* ... */ }).await?;
//! let sale = ledger.sell_units(&lot.lot_id, 4).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult};
pub use ledger::{PurchaseEntry, PurchaseReceipt, SaleReceipt, StockLedger};
