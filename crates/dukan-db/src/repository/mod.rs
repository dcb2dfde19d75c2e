//! # Repository Module
//!
//! Database repository implementations for Dukan.
//!
//! Repositories keep every SQL statement in one place and expose a typed
//! API over the three tables:
//!
//! ```text
//! StockLedger / seed binary
//!      │
//!      │  db.products().list(None)
//!      ▼
//! ProductRepository ── SQL ──► SQLite
//! SaleRepository
//! SettingsRepository
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Purchase-lot CRUD and report queries
//! - [`sale::SaleRepository`] - Sales ledger queries and aggregates
//! - [`settings::SettingsRepository`] - The settings singleton row

pub mod product;
pub mod sale;
pub mod settings;
