//! # dukan-db: Database Layer for Dukan
//!
//! This crate provides database access for the Dukan inventory ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! dukan-ledger (StockLedger)
//!      │
//!      ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  dukan-db (THIS CRATE)                   │
//! │                                                          │
//! │  ┌────────────┐   ┌──────────────┐   ┌───────────────┐   │
//! │  │  Database  │   │ Repositories │   │  Migrations   │   │
//! │  │ (pool.rs)  │◄──│ product.rs   │   │  (embedded)   │   │
//! │  │ SqlitePool │   │ sale.rs      │   │ 001_init.sql  │   │
//! │  │            │   │ settings.rs  │   │               │   │
//! │  └────────────┘   └──────────────┘   └───────────────┘   │
//! └──────────────────────────┬───────────────────────────────┘
//!                            ▼
//!                    SQLite database file
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale, settings)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukan_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/dukan.db")).await?;
//!
//! // Use repositories
//! let lots = db.products().list(Some("milk")).await?;
//! let history = db.sales().list_with_product().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
