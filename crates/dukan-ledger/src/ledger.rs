//! # Stock Ledger
//!
//! The inventory bookkeeping operations.
//!
//! ```text
//! add_purchase_lot ──► merge into (name, expiration) lot, or insert new
//! sell_units       ──► one transaction: conditional decrement + sale row
//!                      with unit price/cost snapshots
//! reports          ──► low stock, expiring soon, total profit, dashboard
//! settings         ──► validated read/write of the two global values
//! ```
//!
//! The sell sequence is the only multi-statement write against a live lot
//! and runs as a single transaction: no other write can interleave between
//! the quantity read and the quantity write, and a failure after the
//! decrement rolls the sale row back with it.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use dukan_core::validation;
use dukan_core::{
    DashboardSummary, ExpiringItem, LowStockItem, Money, ProductLot, SaleListing, Settings,
    DEFAULT_EXPIRY_WINDOW_DAYS,
};
use dukan_db::{Database, DbError};

// =============================================================================
// Operation Inputs & Receipts
// =============================================================================

/// Input for recording a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseEntry {
    /// Item name; trimmed before use, must be non-empty.
    pub name: String,
    /// Units bought. Must be positive.
    pub quantity: i64,
    /// Purchase price per unit.
    pub buy_price: Money,
    /// Selling price per unit. Must not be below `buy_price`.
    pub sell_price: Money,
    /// Expiration date, if perishable. Part of the lot identity.
    pub expiration: Option<NaiveDate>,
}

/// Result of recording a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// The lot the purchase landed in.
    pub lot_id: String,
    /// Units on hand in that lot after the entry.
    pub quantity_on_hand: i64,
    /// Whether the entry merged into an existing lot (true) or created a
    /// new one (false).
    pub merged: bool,
}

/// Result of recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// The created sale ledger entry.
    pub sale_id: String,
    /// Units left in the lot after the sale.
    pub quantity_on_hand: i64,
    /// quantity × unit sell price, from the snapshot.
    pub total: Money,
    /// quantity × (unit sell price − unit cost), from the snapshot.
    pub profit: Money,
}

// =============================================================================
// Stock Ledger
// =============================================================================

/// Business-logic surface over the ledger store.
///
/// Cheap to clone; all clones share the underlying pool.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./dukan.db")).await?;
/// let ledger = StockLedger::new(db);
///
/// let receipt = ledger.sell_units(&lot_id, 4).await?;
/// println!("sold for {}", receipt.total);
/// ```
#[derive(Debug, Clone)]
pub struct StockLedger {
    db: Database,
}

impl StockLedger {
    /// Creates a ledger over an opened database.
    pub fn new(db: Database) -> Self {
        StockLedger { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    /// Records a purchase of stock.
    ///
    /// Merge policy: a lot is identified by `(name, expiration)`. If a lot
    /// with that identity exists, its quantity is increased by the entry's
    /// quantity and its prices are overwritten with the entry's prices
    /// (the newest restock wins). Otherwise a new lot row is created.
    ///
    /// ## Errors
    /// * `LedgerError::Validation` - non-positive quantity, empty name,
    ///   negative price, or sell price below buy price; nothing is written
    /// * `LedgerError::Storage` - persistence failure
    pub async fn add_purchase_lot(&self, entry: PurchaseEntry) -> LedgerResult<PurchaseReceipt> {
        let name = validation::validate_lot_name(&entry.name)?;
        validation::validate_quantity(entry.quantity)?;
        validation::validate_price_pair(entry.sell_price.cents(), entry.buy_price.cents())?;

        debug!(name = %name, quantity = entry.quantity, "add_purchase_lot");

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let existing = sqlx::query_as::<_, ProductLot>(
            r#"
            SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                   expiration_date, created_at, updated_at
            FROM products
            WHERE name = ?1 AND expiration_date IS ?2
            "#,
        )
        .bind(&name)
        .bind(entry.expiration)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let now = Utc::now();

        let receipt = match existing {
            Some(lot) => {
                let new_quantity = lot.quantity + entry.quantity;

                sqlx::query(
                    r#"
                    UPDATE products SET
                        quantity = ?2,
                        buy_price_cents = ?3,
                        sell_price_cents = ?4,
                        updated_at = ?5
                    WHERE id = ?1
                    "#,
                )
                .bind(&lot.id)
                .bind(new_quantity)
                .bind(entry.buy_price.cents())
                .bind(entry.sell_price.cents())
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(DbError::from)?;

                PurchaseReceipt {
                    lot_id: lot.id,
                    quantity_on_hand: new_quantity,
                    merged: true,
                }
            }
            None => {
                let id = Uuid::new_v4().to_string();

                sqlx::query(
                    r#"
                    INSERT INTO products (
                        id, name, quantity, buy_price_cents, sell_price_cents,
                        expiration_date, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                )
                .bind(&id)
                .bind(&name)
                .bind(entry.quantity)
                .bind(entry.buy_price.cents())
                .bind(entry.sell_price.cents())
                .bind(entry.expiration)
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(DbError::from)?;

                PurchaseReceipt {
                    lot_id: id,
                    quantity_on_hand: entry.quantity,
                    merged: false,
                }
            }
        };

        tx.commit().await.map_err(DbError::from)?;

        info!(
            lot_id = %receipt.lot_id,
            quantity_on_hand = receipt.quantity_on_hand,
            merged = receipt.merged,
            "Purchase recorded"
        );

        Ok(receipt)
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Sells units from a lot.
    ///
    /// Runs as one transaction: the lot quantity is decremented with a
    /// guard (`quantity >= requested`) and the sale row is inserted with
    /// the unit sell price and unit cost frozen at this moment. Either
    /// both writes land or neither does.
    ///
    /// ## Errors
    /// * `LedgerError::Validation` - non-positive quantity or malformed id
    /// * `LedgerError::LotNotFound` - no lot with this id
    /// * `LedgerError::InsufficientStock` - requested more than on hand;
    ///   carries the available quantity
    /// * `LedgerError::Storage` - persistence failure (fully rolled back)
    pub async fn sell_units(&self, lot_id: &str, quantity: i64) -> LedgerResult<SaleReceipt> {
        validation::validate_lot_id(lot_id)?;
        validation::validate_quantity(quantity)?;

        debug!(lot_id = %lot_id, quantity, "sell_units");

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let lot = sqlx::query_as::<_, ProductLot>(
            r#"
            SELECT id, name, quantity, buy_price_cents, sell_price_cents,
                   expiration_date, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(lot_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let lot = lot.ok_or_else(|| LedgerError::LotNotFound {
            lot_id: lot_id.to_string(),
        })?;

        if lot.quantity < quantity {
            // Transaction drops here, nothing was written.
            return Err(LedgerError::InsufficientStock {
                lot_id: lot.id,
                name: lot.name,
                available: lot.quantity,
                requested: quantity,
            });
        }

        let now = Utc::now();

        // Guarded decrement: the WHERE clause re-checks availability so a
        // concurrent sale against the same lot cannot take it negative.
        let updated = sqlx::query(
            r#"
            UPDATE products SET
                quantity = quantity - ?2,
                updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(&lot.id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if updated.rows_affected() == 0 {
            return Err(LedgerError::InsufficientStock {
                lot_id: lot.id,
                name: lot.name,
                available: lot.quantity,
                requested: quantity,
            });
        }

        let total = lot.sell_price().multiply_quantity(quantity);
        let profit = (lot.sell_price() - lot.buy_price()).multiply_quantity(quantity);
        let sale_id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, quantity_sold, unit_price_cents,
                unit_cost_cents, total_cents, profit_cents, sale_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale_id)
        .bind(&lot.id)
        .bind(quantity)
        .bind(lot.sell_price_cents)
        .bind(lot.buy_price_cents)
        .bind(total.cents())
        .bind(profit.cents())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        let quantity_on_hand = lot.quantity - quantity;

        info!(
            sale_id = %sale_id,
            lot_id = %lot.id,
            quantity,
            total_cents = total.cents(),
            profit_cents = profit.cents(),
            "Sale recorded"
        );

        Ok(SaleReceipt {
            sale_id,
            quantity_on_hand,
            total,
            profit,
        })
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    /// Current stock, optionally filtered by a name substring.
    ///
    /// Ordered by expiration ascending (unexpiring lots last). Includes
    /// zero-quantity lots.
    pub async fn stock_listing(&self, name_filter: Option<&str>) -> LedgerResult<Vec<ProductLot>> {
        let filter = match name_filter {
            Some(f) => {
                let trimmed = validation::validate_name_filter(f)?;
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            None => None,
        };

        let lots = self.db.products().list(filter.as_deref()).await?;
        Ok(lots)
    }

    /// Lots currently available for sale (quantity > 0), by name.
    pub async fn in_stock_lots(&self) -> LedgerResult<Vec<ProductLot>> {
        let lots = self.db.products().list_in_stock().await?;
        Ok(lots)
    }

    /// Sales history, newest first, with product names left-joined.
    pub async fn sales_history(&self) -> LedgerResult<Vec<SaleListing>> {
        let listings = self.db.sales().list_with_product().await?;
        Ok(listings)
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Lots at or below the threshold, ascending by quantity.
    ///
    /// `threshold` defaults to the stored settings value when `None`.
    pub async fn low_stock_report(&self, threshold: Option<i64>) -> LedgerResult<Vec<LowStockItem>> {
        let threshold = match threshold {
            Some(t) => {
                validation::validate_threshold(t)?;
                t
            }
            None => self.db.settings().get().await?.low_stock_threshold,
        };

        let items = self.db.products().low_stock(threshold).await?;
        Ok(items)
    }

    /// Lots expiring within `within_days` of today, ascending by date.
    ///
    /// Lots without an expiration date never appear. A negative window
    /// reports only already-expired stock.
    pub async fn expiring_soon_report(&self, within_days: i64) -> LedgerResult<Vec<ExpiringItem>> {
        let cutoff = Utc::now().date_naive() + Duration::days(within_days);
        let items = self.db.products().expiring_before(cutoff).await?;
        Ok(items)
    }

    /// All-time profit: the sum of the profit snapshots stored on each
    /// sale. Later price edits on products never change this figure.
    pub async fn total_profit(&self) -> LedgerResult<Money> {
        let cents = self.db.sales().total_profit().await?;
        Ok(Money::from_cents(cents))
    }

    /// Read-only aggregate for the dashboard view.
    ///
    /// Uses the stored low-stock threshold and a 7-day expiry window. The
    /// USD profit figure is derived from the stored exchange rate at read
    /// time; only the IQD snapshots are ledger state.
    pub async fn dashboard_summary(&self) -> LedgerResult<DashboardSummary> {
        let settings = self.db.settings().get().await?;

        let total_lot_count = self.db.products().count().await?;
        let total_quantity_on_hand = self.db.products().total_quantity().await?;
        let total_units_sold = self.db.sales().total_units_sold().await?;
        let total_profit_cents = self.db.sales().total_profit().await?;
        let total_profit_usd_cents = Money::from_cents(total_profit_cents)
            .iqd_to_usd(settings.exchange_rate())
            .cents();

        let low_stock_items = self
            .db
            .products()
            .low_stock(settings.low_stock_threshold)
            .await?;

        let cutoff = Utc::now().date_naive() + Duration::days(DEFAULT_EXPIRY_WINDOW_DAYS);
        let expiring_soon_items = self.db.products().expiring_before(cutoff).await?;

        Ok(DashboardSummary {
            total_lot_count,
            total_quantity_on_hand,
            total_units_sold,
            total_profit_cents,
            total_profit_usd_cents,
            low_stock_items,
            expiring_soon_items,
        })
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Reads the global settings.
    pub async fn settings(&self) -> LedgerResult<Settings> {
        let settings = self.db.settings().get().await?;
        Ok(settings)
    }

    /// Updates the global settings.
    ///
    /// ## Errors
    /// * `LedgerError::Validation` - rate not a positive finite number, or
    ///   threshold negative; nothing is written
    pub async fn update_settings(&self, rate: f64, threshold: i64) -> LedgerResult<Settings> {
        validation::validate_exchange_rate(rate)?;
        validation::validate_threshold(threshold)?;

        self.db.settings().update(rate, threshold).await?;

        info!(rate, threshold, "Settings updated");

        Ok(Settings {
            usd_to_iqd_rate: rate,
            low_stock_threshold: threshold,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dukan_core::ValidationError;
    use dukan_db::DbConfig;

    async fn ledger() -> StockLedger {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        StockLedger::new(db)
    }

    fn entry(
        name: &str,
        quantity: i64,
        buy_cents: i64,
        sell_cents: i64,
        expiration: Option<NaiveDate>,
    ) -> PurchaseEntry {
        PurchaseEntry {
            name: name.to_string(),
            quantity,
            buy_price: Money::from_cents(buy_cents),
            sell_price: Money::from_cents(sell_cents),
            expiration,
        }
    }

    fn days_from_now(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_new_purchase_creates_lot() {
        let ledger = ledger().await;

        let receipt = ledger
            .add_purchase_lot(entry("Rice 5kg", 7, 900, 1250, None))
            .await
            .unwrap();

        assert!(!receipt.merged);
        assert_eq!(receipt.quantity_on_hand, 7);

        let lots = ledger.stock_listing(None).await.unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].name, "Rice 5kg");
        assert_eq!(lots[0].quantity, 7);
        assert_eq!(ledger.database().products().total_quantity().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_restock_same_identity_merges() {
        let ledger = ledger().await;
        let exp = Some(days_from_now(10));

        let first = ledger
            .add_purchase_lot(entry("Milk 1L", 10, 100, 150, exp))
            .await
            .unwrap();
        let second = ledger
            .add_purchase_lot(entry("Milk 1L", 5, 110, 160, exp))
            .await
            .unwrap();

        assert!(second.merged);
        assert_eq!(second.lot_id, first.lot_id);
        assert_eq!(second.quantity_on_hand, 15);

        let lots = ledger.stock_listing(None).await.unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].quantity, 15);
        // The newest restock's prices win
        assert_eq!(lots[0].buy_price_cents, 110);
        assert_eq!(lots[0].sell_price_cents, 160);
    }

    #[tokio::test]
    async fn test_restock_different_expiration_splits() {
        let ledger = ledger().await;

        let first = ledger
            .add_purchase_lot(entry("Milk 1L", 10, 100, 150, Some(days_from_now(3))))
            .await
            .unwrap();
        let second = ledger
            .add_purchase_lot(entry("Milk 1L", 5, 100, 150, Some(days_from_now(9))))
            .await
            .unwrap();

        assert!(!second.merged);
        assert_ne!(second.lot_id, first.lot_id);

        let lots = ledger.stock_listing(None).await.unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(ledger.database().products().total_quantity().await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_restock_without_expiration_merges() {
        let ledger = ledger().await;

        ledger
            .add_purchase_lot(entry("Sugar 1kg", 6, 110, 160, None))
            .await
            .unwrap();
        let second = ledger
            .add_purchase_lot(entry("Sugar 1kg", 4, 110, 160, None))
            .await
            .unwrap();

        assert!(second.merged);
        assert_eq!(second.quantity_on_hand, 10);
    }

    #[tokio::test]
    async fn test_purchase_name_is_trimmed() {
        let ledger = ledger().await;

        ledger
            .add_purchase_lot(entry("  Tea 500g  ", 3, 350, 500, None))
            .await
            .unwrap();
        let second = ledger
            .add_purchase_lot(entry("Tea 500g", 2, 350, 500, None))
            .await
            .unwrap();

        assert!(second.merged);

        let lots = ledger.stock_listing(None).await.unwrap();
        assert_eq!(lots[0].name, "Tea 500g");
    }

    #[tokio::test]
    async fn test_purchase_validation_rejects_bad_input() {
        let ledger = ledger().await;

        let cases = vec![
            entry("Milk", 0, 100, 150, None),    // zero quantity
            entry("Milk", -3, 100, 150, None),   // negative quantity
            entry("   ", 5, 100, 150, None),     // blank name
            entry("Milk", 5, 150, 100, None),    // sell below buy
            entry("Milk", 5, -10, 150, None),    // negative buy price
        ];

        for case in cases {
            let err = ledger.add_purchase_lot(case).await.unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }

        // Nothing was persisted
        assert_eq!(ledger.database().products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sell_below_buy_is_reported_as_such() {
        let ledger = ledger().await;

        let err = ledger
            .add_purchase_lot(entry("Milk", 5, 150, 100, None))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::SellBelowBuy { .. })
        ));
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_sell_decrements_and_snapshots() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Milk 1L", 10, 100, 150, None))
            .await
            .unwrap();

        let receipt = ledger.sell_units(&lot.lot_id, 4).await.unwrap();

        assert_eq!(receipt.quantity_on_hand, 6);
        assert_eq!(receipt.total.cents(), 600);
        assert_eq!(receipt.profit.cents(), 200);

        let stored = ledger.database().products().get_by_id(&lot.lot_id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 6);

        let sale = ledger
            .database()
            .sales()
            .get_by_id(&receipt.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.quantity_sold, 4);
        assert_eq!(sale.unit_price_cents, 150);
        assert_eq!(sale.unit_cost_cents, 100);
        assert_eq!(sale.total_cents, 600);
        assert_eq!(sale.profit_cents, 200);
        assert_eq!(sale.product_id.as_deref(), Some(lot.lot_id.as_str()));
    }

    #[tokio::test]
    async fn test_sell_unknown_lot() {
        let ledger = ledger().await;

        let missing = Uuid::new_v4().to_string();
        let err = ledger.sell_units(&missing, 1).await.unwrap_err();

        assert!(matches!(err, LedgerError::LotNotFound { .. }));
    }

    #[tokio::test]
    async fn test_sell_malformed_lot_id() {
        let ledger = ledger().await;

        let err = ledger.sell_units("not-a-uuid", 1).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sell_insufficient_stock_mutates_nothing() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("White Cheese", 6, 180, 260, None))
            .await
            .unwrap();

        let err = ledger.sell_units(&lot.lot_id, 20).await.unwrap_err();

        match err {
            LedgerError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 6);
                assert_eq!(requested, 20);
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }

        // No partial mutation: quantity untouched, no sale row
        let stored = ledger.database().products().get_by_id(&lot.lot_id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 6);
        assert_eq!(ledger.database().sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sell_sequence_never_goes_negative() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Eggs Dozen", 10, 250, 350, None))
            .await
            .unwrap();

        ledger.sell_units(&lot.lot_id, 4).await.unwrap();
        ledger.sell_units(&lot.lot_id, 4).await.unwrap();

        // 2 left; the first over-draining sell fails and changes nothing
        let err = ledger.sell_units(&lot.lot_id, 4).await.unwrap_err();
        match err {
            LedgerError::InsufficientStock { available, .. } => assert_eq!(available, 2),
            other => panic!("expected InsufficientStock, got {:?}", other),
        }

        ledger.sell_units(&lot.lot_id, 2).await.unwrap();

        let stored = ledger.database().products().get_by_id(&lot.lot_id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
        assert_eq!(ledger.database().sales().total_units_sold().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_profit_snapshot_survives_price_changes() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Apples 1kg", 10, 120, 180, None))
            .await
            .unwrap();

        let first = ledger.sell_units(&lot.lot_id, 4).await.unwrap();
        assert_eq!(first.profit.cents(), (180 - 120) * 4);

        // Reprice the lot after the first sale
        ledger
            .database()
            .products()
            .update_quantity_and_prices(&lot.lot_id, 6, 10, 9999)
            .await
            .unwrap();

        let second = ledger.sell_units(&lot.lot_id, 2).await.unwrap();
        assert_eq!(second.profit.cents(), (9999 - 10) * 2);

        // The first sale's stored snapshot is untouched by the reprice
        let stored_first = ledger
            .database()
            .sales()
            .get_by_id(&first.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_first.unit_price_cents, 180);
        assert_eq!(stored_first.unit_cost_cents, 120);
        assert_eq!(stored_first.profit_cents, (180 - 120) * 4);

        let total = ledger.total_profit().await.unwrap();
        assert_eq!(total.cents(), (180 - 120) * 4 + (9999 - 10) * 2);
    }

    #[tokio::test]
    async fn test_total_profit_matches_history_sum() {
        let ledger = ledger().await;

        let milk = ledger
            .add_purchase_lot(entry("Milk 1L", 12, 100, 150, Some(days_from_now(3))))
            .await
            .unwrap();
        let rice = ledger
            .add_purchase_lot(entry("Rice 5kg", 7, 900, 1250, None))
            .await
            .unwrap();

        ledger.sell_units(&milk.lot_id, 5).await.unwrap();
        ledger.sell_units(&rice.lot_id, 2).await.unwrap();
        ledger.sell_units(&milk.lot_id, 1).await.unwrap();

        let history = ledger.sales_history().await.unwrap();
        assert_eq!(history.len(), 3);

        let summed: i64 = history.iter().map(|s| s.profit_cents).sum();
        assert_eq!(ledger.total_profit().await.unwrap().cents(), summed);
        assert_eq!(summed, (150 - 100) * 6 + (1250 - 900) * 2);
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_low_stock_report_exact_and_sorted() {
        let ledger = ledger().await;

        ledger.add_purchase_lot(entry("Dish Soap", 2, 130, 200, None)).await.unwrap();
        ledger.add_purchase_lot(entry("Tea 500g", 5, 350, 500, None)).await.unwrap();
        ledger.add_purchase_lot(entry("Sugar 1kg", 9, 110, 160, None)).await.unwrap();

        let report = ledger.low_stock_report(Some(5)).await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Dish Soap");
        assert_eq!(report[0].quantity, 2);
        assert_eq!(report[1].name, "Tea 500g");
        assert_eq!(report[1].quantity, 5);
    }

    #[tokio::test]
    async fn test_low_stock_report_empty_inventory() {
        let ledger = ledger().await;
        let report = ledger.low_stock_report(Some(100)).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_report_defaults_to_settings() {
        let ledger = ledger().await;

        ledger.add_purchase_lot(entry("Dish Soap", 2, 130, 200, None)).await.unwrap();
        ledger.add_purchase_lot(entry("Sugar 1kg", 9, 110, 160, None)).await.unwrap();

        // Seeded threshold is 5
        let report = ledger.low_stock_report(None).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].name, "Dish Soap");

        ledger.update_settings(1500.0, 10).await.unwrap();
        let report = ledger.low_stock_report(None).await.unwrap();
        assert_eq!(report.len(), 2);
    }

    #[tokio::test]
    async fn test_low_stock_report_rejects_negative_threshold() {
        let ledger = ledger().await;
        let err = ledger.low_stock_report(Some(-1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_expiring_soon_excludes_null_and_far_dates() {
        let ledger = ledger().await;

        ledger
            .add_purchase_lot(entry("Flatbread", 15, 50, 80, Some(days_from_now(2))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Milk 1L", 12, 100, 150, Some(days_from_now(3))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Canned Beans", 30, 90, 140, Some(days_from_now(30))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Rice 5kg", 7, 900, 1250, None))
            .await
            .unwrap();

        let report = ledger.expiring_soon_report(7).await.unwrap();

        assert_eq!(report.len(), 2);
        // Ascending by date
        assert_eq!(report[0].name, "Flatbread");
        assert_eq!(report[0].expiration_date, days_from_now(2));
        assert_eq!(report[1].name, "Milk 1L");
    }

    #[tokio::test]
    async fn test_dashboard_summary_aggregates() {
        let ledger = ledger().await;

        // 1000.00 IQD buy, 1750.00 IQD sell: 750 IQD margin per unit
        let milk = ledger
            .add_purchase_lot(entry("Milk 1L", 10, 100_000, 175_000, Some(days_from_now(3))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Dish Soap", 2, 130, 200, None))
            .await
            .unwrap();

        ledger.sell_units(&milk.lot_id, 4).await.unwrap();

        let summary = ledger.dashboard_summary().await.unwrap();

        assert_eq!(summary.total_lot_count, 2);
        assert_eq!(summary.total_quantity_on_hand, 6 + 2);
        assert_eq!(summary.total_units_sold, 4);
        // 4 × 750.00 IQD margin
        assert_eq!(summary.total_profit_cents, 300_000);
        assert_eq!(summary.total_profit().cents(), 300_000);
        // 3000 IQD at the seeded 1500 IQD/USD rate = 2.00 USD
        assert_eq!(summary.total_profit_usd_cents, 200);
        assert_eq!(summary.total_profit_usd().cents(), 200);
        // Dish Soap (2) is at or below the seeded threshold of 5
        assert_eq!(summary.low_stock_items.len(), 1);
        assert_eq!(summary.low_stock_items[0].name, "Dish Soap");
        // Milk expires within the 7-day window
        assert_eq!(summary.expiring_soon_items.len(), 1);
        assert_eq!(summary.expiring_soon_items[0].name, "Milk 1L");
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_stock_listing_order_and_filter() {
        let ledger = ledger().await;

        ledger
            .add_purchase_lot(entry("Apples 1kg", 14, 120, 180, Some(days_from_now(10))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Milk 1L", 12, 100, 150, Some(days_from_now(2))))
            .await
            .unwrap();
        ledger
            .add_purchase_lot(entry("Rice 5kg", 7, 900, 1250, None))
            .await
            .unwrap();

        let lots = ledger.stock_listing(None).await.unwrap();
        let names: Vec<&str> = lots.iter().map(|l| l.name.as_str()).collect();
        // Soonest expiration first, unexpiring lots last
        assert_eq!(names, vec!["Milk 1L", "Apples 1kg", "Rice 5kg"]);

        let filtered = ledger.stock_listing(Some("il")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Milk 1L");
    }

    #[tokio::test]
    async fn test_zero_quantity_lots_stay_listed() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Flatbread", 3, 50, 80, Some(days_from_now(2))))
            .await
            .unwrap();
        ledger.sell_units(&lot.lot_id, 3).await.unwrap();

        let lots = ledger.stock_listing(None).await.unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].quantity, 0);

        // But it is no longer offered for sale
        let sellable = ledger.in_stock_lots().await.unwrap();
        assert!(sellable.is_empty());
    }

    #[tokio::test]
    async fn test_sales_history_survives_product_deletion() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Chicken Breast", 6, 450, 650, Some(days_from_now(4))))
            .await
            .unwrap();
        let receipt = ledger.sell_units(&lot.lot_id, 3).await.unwrap();

        ledger.database().products().delete(&lot.lot_id).await.unwrap();

        let history = ledger.sales_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, receipt.sale_id);
        // The weak reference dangles; the snapshot keeps the row meaningful
        assert_eq!(history[0].product_name, None);
        assert_eq!(history[0].profit_cents, (650 - 450) * 3);

        assert_eq!(ledger.total_profit().await.unwrap().cents(), (650 - 450) * 3);
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_settings_round_trip() {
        let ledger = ledger().await;

        ledger.update_settings(1450.0, 3).await.unwrap();

        let settings = ledger.settings().await.unwrap();
        assert!((settings.usd_to_iqd_rate - 1450.0).abs() < f64::EPSILON);
        assert_eq!(settings.low_stock_threshold, 3);
    }

    #[tokio::test]
    async fn test_settings_validation() {
        let ledger = ledger().await;

        assert!(matches!(
            ledger.update_settings(0.0, 5).await.unwrap_err(),
            LedgerError::Validation(_)
        ));
        assert!(matches!(
            ledger.update_settings(-1450.0, 5).await.unwrap_err(),
            LedgerError::Validation(_)
        ));
        assert!(matches!(
            ledger.update_settings(1500.0, -1).await.unwrap_err(),
            LedgerError::Validation(_)
        ));

        // Failed updates leave the seeded defaults in place
        let settings = ledger.settings().await.unwrap();
        assert!((settings.usd_to_iqd_rate - 1500.0).abs() < f64::EPSILON);
        assert_eq!(settings.low_stock_threshold, 5);
    }

    // -------------------------------------------------------------------------
    // End-to-end scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_end_to_end_milk_scenario() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Milk", 10, 100, 150, Some(days_from_now(3))))
            .await
            .unwrap();

        let receipt = ledger.sell_units(&lot.lot_id, 4).await.unwrap();

        assert_eq!(receipt.quantity_on_hand, 6);
        assert_eq!(receipt.total, Money::from_cents(600));
        assert_eq!(receipt.profit, Money::from_cents(200));

        assert_eq!(ledger.total_profit().await.unwrap().cents(), 200);

        let low = ledger.low_stock_report(Some(5)).await.unwrap();
        assert!(low.is_empty());

        let expiring = ledger.expiring_soon_report(7).await.unwrap();
        assert!(expiring.iter().any(|item| item.name == "Milk"));
    }

    #[tokio::test]
    async fn test_end_to_end_oversell_scenario() {
        let ledger = ledger().await;

        let lot = ledger
            .add_purchase_lot(entry("Yogurt 500g", 6, 80, 120, Some(days_from_now(5))))
            .await
            .unwrap();

        let err = ledger.sell_units(&lot.lot_id, 20).await.unwrap_err();
        match err {
            LedgerError::InsufficientStock { available, .. } => assert_eq!(available, 6),
            other => panic!("expected InsufficientStock, got {:?}", other),
        }

        let stored = ledger.database().products().get_by_id(&lot.lot_id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 6);
        assert_eq!(ledger.database().sales().count().await.unwrap(), 0);
    }
}
