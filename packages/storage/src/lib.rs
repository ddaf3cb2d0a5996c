// ABOUTME: Data layer for the Atelier catalog
// ABOUTME: Storage errors, list encoding, generic repository, pagination and pool setup

pub mod list_codec;
pub mod pagination;
pub mod pool;
pub mod repository;

use thiserror::Error;

pub use list_codec::ListInput;
pub use pagination::{PageMeta, PageParams, PaginatedResponse};
pub use pool::{connect, run_migrations, PoolSettings, MIGRATOR};
pub use repository::{Assignment, Field, Filter, Record, Repository, SortKey, SqlValue};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Unique constraint violated: {0}")]
    Conflict(String),
    #[error("Integrity constraint violated: {0}")]
    Integrity(String),
    #[error("Invalid stored value: {0}")]
    Decode(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Classify a driver error into the conflict / integrity buckets
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StorageError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
                || matches!(db_err.kind(), sqlx::error::ErrorKind::NotNullViolation)
            {
                return StorageError::Integrity(db_err.message().to_string());
            }
        }
        StorageError::Sqlx(err)
    }

    /// Whether this is a unique violation on `column` of any table.
    /// SQLite reports them as `UNIQUE constraint failed: table.col[, table.col]`.
    pub fn is_conflict_on(&self, column: &str) -> bool {
        let StorageError::Conflict(message) = self else {
            return false;
        };

        let columns = message.rsplit(':').next().unwrap_or_default();
        columns
            .split(',')
            .filter_map(|qualified| qualified.trim().rsplit('.').next())
            .any(|name| name == column)
    }
}
