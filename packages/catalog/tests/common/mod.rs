// ABOUTME: Shared fixtures for catalog integration tests
// ABOUTME: Migrated in-memory database and small builders for parent records

#![allow(dead_code)]

use std::str::FromStr;

use atelier_catalog::{Collection, CollectionCreateInput, DbState, Suite, SuiteCreateInput};
use atelier_storage::run_migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Helper to create a migrated in-memory database for testing
pub async fn setup_db() -> DbState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();

    DbState::new(pool)
}

pub async fn create_suite(db: &DbState, name: &str) -> Suite {
    db.suite_storage
        .create(SuiteCreateInput {
            name: name.to_string(),
            description: None,
            is_active: true,
        })
        .await
        .unwrap()
}

pub async fn create_collection(db: &DbState, name: &str, suite_id: &str) -> Collection {
    db.collection_storage
        .create(CollectionCreateInput {
            name: name.to_string(),
            description: None,
            image: None,
            is_active: true,
            display_order: 0,
            suite_id: suite_id.to_string(),
        })
        .await
        .unwrap()
}
