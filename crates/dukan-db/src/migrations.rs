//! # Database Migrations
//!
//! Embedded SQL migrations for Dukan.
//!
//! ```text
//! App startup
//!      │
//!      ▼
//! Compare embedded migrations vs _sqlx_migrations table
//!      │
//!      ├── 001_initial_schema.sql ✓ (already applied)
//!      └── NNN_*.sql              ⬜ (new - runs now, in order)
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Add a file under `migrations/sqlite/` named `NNN_description.sql`
//!    with the next sequence number (e.g., `002_add_supplier_table.sql`)
//! 2. Keep the SQL idempotent (`IF NOT EXISTS` where possible)
//! 3. Applied migrations are immutable - fix mistakes with a new file

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations, baked in from `migrations/sqlite` at compile time.
/// The deployed binary needs no migration files on disk.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any migrations not yet recorded in `_sqlx_migrations`.
///
/// Pending files run in filename order, each in its own transaction.
/// Idempotent: safe on every process start. The initial migration also
/// seeds the settings singleton row.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Applying pending migrations");

    MIGRATOR.run(pool).await?;

    info!("Migrations up to date");
    Ok(())
}

/// Migration diagnostics: (embedded count, applied count).
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // The tracking table may not exist yet on a fresh database
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
