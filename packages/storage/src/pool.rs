// ABOUTME: SQLite connection pool setup and embedded migrations
// ABOUTME: Applies connection pragmas per connection and runs the schema migrations

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::{debug, info};

use crate::{StorageError, StorageResult};

/// Schema migrations embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool tuning knobs
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Log every SQL statement at debug level
    pub log_statements: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            log_statements: false,
        }
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a connection pool for the given SQLite URL
pub async fn connect(database_url: &str, settings: &PoolSettings) -> StorageResult<SqlitePool> {
    debug!("Connecting to database: {}", database_url);

    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(StorageError::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true);

    if !is_in_memory(database_url) {
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    if !settings.log_statements {
        options = options.disable_statement_logging();
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    info!("Database connection established");
    Ok(pool)
}

/// Apply all pending schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    MIGRATOR.run(pool).await.map_err(StorageError::Migration)?;
    debug!("Database migrations completed");
    Ok(())
}
