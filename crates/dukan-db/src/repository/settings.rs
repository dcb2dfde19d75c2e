//! # Settings Repository
//!
//! Accessor over the settings singleton row (fixed id = 1).
//!
//! The row is seeded by the initial migration, so `get` can rely on it
//! existing; `update` upserts anyway so a hand-pruned database heals
//! itself.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use dukan_core::Settings;

/// Fixed primary key of the singleton row.
const SETTINGS_ROW_ID: i64 = 1;

/// Repository for the global settings row.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads the current settings.
    pub async fn get(&self) -> DbResult<Settings> {
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            SELECT usd_to_iqd_rate, low_stock_threshold
            FROM settings
            WHERE id = ?1
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Writes both settings values in place.
    ///
    /// Value validation (rate > 0, threshold >= 0) happens in the ledger
    /// layer before this is called; the schema CHECKs back it up.
    pub async fn update(&self, usd_to_iqd_rate: f64, low_stock_threshold: i64) -> DbResult<()> {
        debug!(usd_to_iqd_rate, low_stock_threshold, "Updating settings");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO settings (id, usd_to_iqd_rate, low_stock_threshold, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                usd_to_iqd_rate = excluded.usd_to_iqd_rate,
                low_stock_threshold = excluded.low_stock_threshold,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(usd_to_iqd_rate)
        .bind(low_stock_threshold)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
