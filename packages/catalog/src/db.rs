// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the catalog storages

use std::sync::Arc;

use atelier_storage::{connect, run_migrations, PoolSettings, StorageError};
use sqlx::SqlitePool;
use tracing::info;

use crate::collections::CollectionStorage;
use crate::items::ItemStorage;
use crate::packages::PackageStorage;
use crate::suites::SuiteStorage;
use crate::testimonials::TestimonialStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub suite_storage: Arc<SuiteStorage>,
    pub collection_storage: Arc<CollectionStorage>,
    pub item_storage: Arc<ItemStorage>,
    pub package_storage: Arc<PackageStorage>,
    pub testimonial_storage: Arc<TestimonialStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            suite_storage: Arc::new(SuiteStorage::new(pool.clone())),
            collection_storage: Arc::new(CollectionStorage::new(pool.clone())),
            item_storage: Arc::new(ItemStorage::new(pool.clone())),
            package_storage: Arc::new(PackageStorage::new(pool.clone())),
            testimonial_storage: Arc::new(TestimonialStorage::new(pool.clone())),
            pool,
        }
    }

    /// Connect to the database, apply migrations and build the storages
    pub async fn init(database_url: &str, settings: &PoolSettings) -> Result<Self, StorageError> {
        let pool = connect(database_url, settings).await?;
        run_migrations(&pool).await?;

        info!("Catalog database ready");
        Ok(Self::new(pool))
    }
}
