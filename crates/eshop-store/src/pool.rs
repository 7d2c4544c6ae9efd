//! # Record Store Handle
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Record Store Lifecycle                             │
//! │                                                                         │
//! │  Client startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RecordStore::open(config).await ← Create pool + run migrations         │
//! │       │          (idempotent: re-opening an existing file is safe)      │
//! │       ▼                                                                 │
//! │  store.users() / store.orders() ← Repository access                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.close().await ← Explicit shutdown hook                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled: readers don't block
//! writers, better crash recovery, and a torn process leaves any single
//! in-flight write either fully applied or not applied at all.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::order::OrderRepository;
use crate::repository::user::UserRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Record store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/eshop.db").max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-device storefront)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    pub idle_timeout: Duration,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new configuration with the given database path.
    /// The file will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// The store is isolated and disappears on close — perfect for tests.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires a single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// Main record store handle providing repository access.
///
/// Cloning is cheap: the handle wraps a shared connection pool. The pool
/// serializes writes to a collection internally, and this application
/// issues at most one outstanding mutation per user action, so no
/// additional locking lives at this layer.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl RecordStore {
    /// Opens (or creates) the record store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous, foreign keys
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled) — establishes the `users` and
    ///    `orders` collections with their indices
    ///
    /// Idempotent: opening an already-initialized file changes nothing.
    ///
    /// ## Errors
    /// [`StoreError::Unavailable`] when the storage medium cannot be
    /// opened; [`StoreError::MigrationFailed`] when the schema cannot be
    /// brought up to date.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening record store"
        );

        // sqlite://path with mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            // WAL mode: better concurrent read performance
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: data safe from corruption, may lose the
            // last transaction on a crash
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Record store pool created"
        );

        let store = RecordStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs pending schema migrations. Idempotent; automatically called
    /// by `open()` unless disabled in the config.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running record store migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories. Prefer the
    /// repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the connection pool. Call on application shutdown;
    /// repository operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing record store pool");
        self.pool.close().await;
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
