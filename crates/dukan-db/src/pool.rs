//! # Database Pool Management
//!
//! Connection handling for the SQLite store.
//!
//! ```text
//! Process startup
//!      │
//!      ▼
//! DbConfig::new(path) ← where the database file lives
//!      │
//!      ▼
//! Database::new(config).await ← open pool + run migrations
//!      │
//!      ▼
//! db.products() / db.sales() / db.settings() ← repository handles
//! ```
//!
//! WAL journal mode is enabled: readers don't block the writer and the
//! database survives a crash mid-write with at most the last transaction
//! lost.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::settings::SettingsRepository;

// =============================================================================
// Configuration
// =============================================================================

/// How to open the database.
///
/// The defaults fit a single-user tracker: a small pool (one writer plus a
/// couple of concurrent readers) over one local file.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created on first open.
    pub database_path: PathBuf,

    /// Open an isolated in-memory database instead of a file.
    pub in_memory: bool,

    /// Pool size. Default: 4.
    pub max_connections: u32,

    /// How long a statement waits on a locked database before failing.
    /// Default: 5 seconds.
    pub busy_timeout: Duration,

    /// Whether to run migrations on open. Default: true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file at `path`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::new("./data/dukan.db").max_connections(2);
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            in_memory: false,
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the pool size.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Configuration for an isolated in-memory database (tests).
    ///
    /// Capped at one connection: every SQLite connection would otherwise
    /// see its own private memory database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::new(),
            in_memory: true,
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone; all clones share the underlying pool.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./dukan.db")).await?;
/// let lots = db.products().list(None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the database described by `config`.
    ///
    /// Creates the file if needed, applies the SQLite tuning (WAL journal,
    /// NORMAL synchronous, foreign keys on, busy timeout), builds the pool,
    /// and runs migrations unless disabled. Safe to call on every process
    /// start.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        if config.in_memory {
            info!("Opening in-memory database");
        } else {
            info!(path = %config.database_path.display(), "Opening database");
        }

        let base_options = if config.in_memory {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
        };

        let connect_options = base_options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout);

        debug!(max_connections = config.max_connections, "Building pool");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            // Keep the lone in-memory connection alive between queries;
            // dropping it would drop the database.
            .min_connections(if config.in_memory { 1 } else { 0 })
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Applies all pending migrations in order and records them in
    /// `_sqlx_migrations`. Idempotent: safe to run multiple times; the
    /// initial migration also seeds the settings singleton.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For multi-statement transactions not covered by single repository
    /// calls (the ledger's purchase-merge and sell sequences). Prefer
    /// repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Returns the settings repository.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
