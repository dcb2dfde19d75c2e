//! # Product Repository
//!
//! Database operations for purchase lots.
//!
//! ## Key Operations
//! - Lot CRUD and (name, expiration) lookup for restock merging
//! - Stock listings ordered by expiration (soonest first, unexpiring last)
//! - Low-stock and expiring-soon report queries

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dukan_core::{ExpiringItem, LowStockItem, ProductLot};

/// Repository for purchase-lot database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // List lots whose name contains "mil"
/// let lots = repo.list(Some("mil")).await?;
///
/// // Get by ID
/// let lot = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new lot row.
    pub async fn insert(&self, lot: &ProductLot) -> DbResult<()> {
        debug!(name = %lot.name, quantity = lot.quantity, "Inserting product lot");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, quantity, buy_price_cents, sell_price_cents,
                expiration_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&lot.id)
        .bind(&lot.name)
        .bind(lot.quantity)
        .bind(lot.buy_price_cents)
        .bind(lot.sell_price_cents)
        .bind(lot.expiration_date)
        .bind(lot.created_at)
        .bind(lot.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a lot by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductLot))` - Lot found
    /// * `Ok(None)` - Lot not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ProductLot>> {
        let lot = sqlx::query_as::<_, ProductLot>(
            r#"
            SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                   expiration_date, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lot)
    }

    /// Finds the lot with the given (name, expiration) identity.
    ///
    /// Uses `IS` comparison so a NULL expiration matches a NULL expiration;
    /// this is the lookup behind restock merging.
    pub async fn find_lot(
        &self,
        name: &str,
        expiration: Option<NaiveDate>,
    ) -> DbResult<Option<ProductLot>> {
        let lot = sqlx::query_as::<_, ProductLot>(
            r#"
            SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                   expiration_date, created_at, updated_at
            FROM products
            WHERE name = ?1 AND expiration_date IS ?2
            "#,
        )
        .bind(name)
        .bind(expiration)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lot)
    }

    /// Lists lots, optionally filtered by a name substring.
    ///
    /// Ordered by expiration ascending; lots without an expiration sort
    /// last, ties break by name. Zero-quantity lots are included.
    pub async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<ProductLot>> {
        let lots = match name_filter.filter(|f| !f.is_empty()) {
            Some(filter) => {
                let pattern = format!("%{}%", filter);
                sqlx::query_as::<_, ProductLot>(
                    r#"
                    SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                           expiration_date, created_at, updated_at
                    FROM products
                    WHERE name LIKE ?1
                    ORDER BY expiration_date IS NULL, expiration_date ASC, name ASC
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductLot>(
                    r#"
                    SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                           expiration_date, created_at, updated_at
                    FROM products
                    ORDER BY expiration_date IS NULL, expiration_date ASC, name ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(lots)
    }

    /// Lists lots with stock on hand (quantity > 0), ordered by name.
    ///
    /// This is the selection offered when recording a sale.
    pub async fn list_in_stock(&self) -> DbResult<Vec<ProductLot>> {
        let lots = sqlx::query_as::<_, ProductLot>(
            r#"
            SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                   expiration_date, created_at, updated_at
            FROM products
            WHERE quantity > 0
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lots)
    }

    /// Updates a lot's quantity and prices.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Lot doesn't exist
    pub async fn update_quantity_and_prices(
        &self,
        id: &str,
        quantity: i64,
        buy_price_cents: i64,
        sell_price_cents: i64,
    ) -> DbResult<()> {
        debug!(id = %id, quantity, "Updating product lot");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                quantity = ?2,
                buy_price_cents = ?3,
                sell_price_cents = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(buy_price_cents)
        .bind(sell_price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product lot", id));
        }

        Ok(())
    }

    /// Hard-deletes a lot row.
    ///
    /// Sales referencing the lot keep their snapshot columns; their
    /// `product_id` simply dangles and the history LEFT JOIN yields NULL
    /// for the name.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product lot");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product lot", id));
        }

        Ok(())
    }

    /// Lots at or below the given quantity threshold, ascending by quantity.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<LowStockItem>> {
        let items = sqlx::query_as::<_, LowStockItem>(
            r#"
            SELECT name, quantity
            FROM products
            WHERE quantity <= ?1
            ORDER BY quantity ASC, name ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lots expiring on or before the cutoff date, ascending by date.
    ///
    /// Lots without an expiration date are excluded.
    pub async fn expiring_before(&self, cutoff: NaiveDate) -> DbResult<Vec<ExpiringItem>> {
        let items = sqlx::query_as::<_, ExpiringItem>(
            r#"
            SELECT name, expiration_date
            FROM products
            WHERE expiration_date IS NOT NULL AND expiration_date <= ?1
            ORDER BY expiration_date ASC, name ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts lot rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Total units on hand across all lots.
    pub async fn total_quantity(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

/// Helper to generate a new lot ID.
pub fn generate_lot_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn lot(name: &str, quantity: i64, expiration: Option<NaiveDate>) -> ProductLot {
        let now = Utc::now();
        ProductLot {
            id: generate_lot_id(),
            name: name.to_string(),
            quantity,
            buy_price_cents: 100,
            sell_price_cents: 150,
            expiration_date: expiration,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let row = lot("Milk 1L", 12, None);
        repo.insert(&row).await.unwrap();

        let stored = repo.get_by_id(&row.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Milk 1L");
        assert_eq!(stored.quantity, 12);
        assert_eq!(stored.expiration_date, None);
    }

    #[tokio::test]
    async fn test_find_lot_matches_on_name_and_expiration() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let exp = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let dated = lot("Milk 1L", 12, Some(exp));
        let undated = lot("Milk 1L", 5, None);
        repo.insert(&dated).await.unwrap();
        repo.insert(&undated).await.unwrap();

        // Same name resolves to different lots per expiration; the IS
        // comparison lets NULL match NULL.
        let found = repo.find_lot("Milk 1L", Some(exp)).await.unwrap().unwrap();
        assert_eq!(found.id, dated.id);

        let found = repo.find_lot("Milk 1L", None).await.unwrap().unwrap();
        assert_eq!(found.id, undated.id);

        assert!(repo.find_lot("Rice 5kg", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_lot_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let err = repo
            .update_quantity_and_prices("no-such-id", 1, 100, 150)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
