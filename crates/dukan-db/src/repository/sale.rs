//! # Sale Repository
//!
//! Database operations for the sales ledger.
//!
//! Covers direct row insertion, history listings, and the stored-snapshot
//! aggregates. Selling against a live lot goes through the stock ledger
//! instead, which pairs the sale insert with the lot decrement in one
//! transaction; the plain [`SaleRepository::insert`] is for callers that
//! already hold a complete record (imports, seed data).

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use dukan_core::{SaleListing, SaleRecord};

/// Repository for sales-ledger database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a complete sale row.
    ///
    /// The record must already carry its price snapshots and derived
    /// totals. Live lots are sold through the stock ledger instead, which
    /// pairs this insert with the quantity decrement in one transaction.
    pub async fn insert(&self, sale: &SaleRecord) -> DbResult<()> {
        debug!(id = %sale.id, quantity_sold = sale.quantity_sold, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, quantity_sold, unit_price_cents,
                unit_cost_cents, total_cents, profit_cents, sale_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity_sold)
        .bind(sale.unit_price_cents)
        .bind(sale.unit_cost_cents)
        .bind(sale.total_cents)
        .bind(sale.profit_cents)
        .bind(sale.sale_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SaleRecord>> {
        let sale = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT id, product_id, quantity_sold, unit_price_cents,
                   unit_cost_cents, total_cents, profit_cents, sale_date
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Sales history, newest first, with the product name left-joined.
    ///
    /// `product_name` is NULL for sales whose lot has since been deleted;
    /// the snapshot columns on the sale row stay authoritative either way.
    pub async fn list_with_product(&self) -> DbResult<Vec<SaleListing>> {
        let listings = sqlx::query_as::<_, SaleListing>(
            r#"
            SELECT s.id, s.product_id, p.name AS product_name,
                   s.quantity_sold, s.unit_price_cents, s.unit_cost_cents,
                   s.total_cents, s.profit_cents, s.sale_date
            FROM sales s
            LEFT JOIN products p ON p.id = s.product_id
            ORDER BY s.sale_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Sum of all stored sale profits, in minor units.
    ///
    /// Sums the profit snapshots written at sale time; current product
    /// prices play no part.
    pub async fn total_profit(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(profit_cents), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Total units sold across all sales.
    pub async fn total_units_sold(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity_sold), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Counts sale rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
